pub mod comments;
pub mod endpoints;
pub mod groups;
pub mod init;
pub mod session;
pub mod tickets;

use serde::Serialize;

use crate::actions::Effect;
use crate::output;
use crate::toast::{flash_toast, ToastCategory};

#[derive(Serialize)]
struct Outcome<'a> {
    message: &'a str,
    #[serde(flatten)]
    effect: &'a Effect,
}

/// Report a finished action: a success toast, then where the page goes next.
pub fn report(message: &str, effect: &Effect) {
    let outcome = Outcome { message, effect };
    output::print_item(&outcome, |outcome| {
        flash_toast(outcome.message, ToastCategory::Success);
        if !output::is_quiet() {
            match outcome.effect {
                Effect::Nothing => {}
                effect => println!("Next: {effect}"),
            }
        }
    });
}
