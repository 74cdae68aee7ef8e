//! pcb-pos - component placement (pos) files for KiCad boards.
//!
//! Loads a `.kicad_pcb` board, keeps the components that are really placed,
//! and writes two fixed-width pick-and-place reports next to the board:
//! `<name>-ALL.pos` with every component and `<name>-SMD.pos` with the
//! surface-mount subset.

pub mod board;
pub mod commands;
pub mod placement;
pub mod report;
