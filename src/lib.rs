// Demo firmware for the ESP32-C6 1.47" touch-LCD module

#![no_std]

pub mod board;
pub mod drivers;
