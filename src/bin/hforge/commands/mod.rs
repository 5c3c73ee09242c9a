mod check;
mod render;
mod spec;

use check::run_check;
use render::run_render;
use spec::run_spec;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Render(args) => run_render(args, ctx),
        Command::Spec(args) => run_spec(args, ctx),
        Command::Check(args) => run_check(args, ctx),
    }
}
