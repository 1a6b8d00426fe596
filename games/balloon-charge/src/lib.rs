use wasm_bindgen::prelude::*;
use maxwell_engine::*;

// Setup
mod config;

// Simulation
mod balloon;
mod charge;
mod drag;
mod electrons;
mod papers;
mod physics;
mod win;

// Session flow and presentation
mod dialog;
mod render;
mod session;

// Main game controller
mod game;

use game::BalloonCharge;

maxwell_web::export_game!(BalloonCharge, "balloon-charge", vectors);
