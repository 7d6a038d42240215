//! `gate` command: check a raw gesture vector against the home-swipe gate.

use homeward_core::{is_home_swipe, CoreError, GestureVector};

pub fn run(x: f32, y: f32) -> Result<(), CoreError> {
    let vector = GestureVector::new(x, y);
    if is_home_swipe(vector) {
        println!("home swipe: yes");
    } else {
        println!("home swipe: no");
    }
    Ok(())
}
