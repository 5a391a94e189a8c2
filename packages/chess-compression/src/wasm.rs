use crate::{compress_pgn, decode_game, explain, CodecError};
use js_sys::{Array, Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;

fn js_error(e: CodecError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn set(target: &Object, key: &str, value: impl Into<JsValue>) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), &value.into()).map(|_| ())
}

fn string_array<I: IntoIterator<Item = String>>(items: I) -> Array {
    items.into_iter().map(|s| JsValue::from_str(&s)).collect()
}

/// Packs space-separated SAN moves.
#[wasm_bindgen]
pub fn wasm_compress_pgn(moves: &str) -> Result<Uint8Array, JsValue> {
    let moves: Vec<&str> = moves.split_whitespace().collect();
    let compressed = compress_pgn(&moves).map_err(js_error)?;
    Ok(Uint8Array::from(compressed.as_slice()))
}

/// Unpacks `plies` moves and returns them space-separated.
#[wasm_bindgen]
pub fn wasm_decompress_pgn(compressed: &[u8], plies: usize) -> Result<String, JsValue> {
    let game = decode_game(compressed, plies).map_err(js_error)?;
    Ok(game.pgn_moves.join(" "))
}

/// Unpacks a game into
/// `{ moves, halfmoveClock, unmovedRooks, positionHashes, lastUci }`.
#[wasm_bindgen]
pub fn wasm_decode_game(compressed: &[u8], plies: usize) -> Result<JsValue, JsValue> {
    let game = decode_game(compressed, plies).map_err(js_error)?;

    let result = Object::new();
    set(&result, "moves", string_array(game.pgn_moves))?;
    set(&result, "halfmoveClock", game.halfmove_clock)?;
    set(
        &result,
        "unmovedRooks",
        string_array(game.unmoved_rooks.into_iter().map(|sq| sq.to_string())),
    )?;
    set(
        &result,
        "positionHashes",
        Uint8Array::from(game.position_hashes.as_slice()),
    )?;
    set(
        &result,
        "lastUci",
        game.last_uci.map_or(JsValue::NULL, |uci| JsValue::from_str(&uci)),
    )?;
    Ok(result.into())
}

/// Ranks of the given space-separated SAN moves.
#[wasm_bindgen]
pub fn wasm_explain(moves: &str) -> Result<Vec<u32>, JsValue> {
    let moves: Vec<&str> = moves.split_whitespace().collect();
    let explained = explain(&moves).map_err(js_error)?;
    Ok(explained.iter().map(|m| m.rank as u32).collect())
}
