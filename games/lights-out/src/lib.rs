use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod game;

use game::LightsOut;

hexlights_web::export_game!(LightsOut, "lights-out");
