// Chip-level drivers, board-independent.
//
// Each module is reusable across boards; pin assignments and bus
// wiring live in board/.

pub mod axs5106;
pub mod jd9853;
pub mod servo;
