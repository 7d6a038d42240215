pub mod gate;
pub mod replay;
