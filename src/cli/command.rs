use std::io::Write;

use super::{help, plot, CommandError};

pub type CommandHandler = fn(&[String], &mut dyn Write) -> Result<(), CommandError>;

/// A command reachable as `geomdl <name>`
#[derive(Clone, Copy, Debug)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub handler: CommandHandler,
    /// number of arguments that must follow the command name
    pub required_args: usize,
    pub summary: &'static str,
    /// detailed usage shown by `geomdl help <name>`
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "help",
        handler: help::command_help,
        required_args: 0,
        summary: "displays this message, `geomdl help {command}` describes a single command",
        usage: help::HELP_USAGE,
    },
    CommandDescriptor {
        name: "version",
        handler: help::command_version,
        required_args: 0,
        summary: "displays the package version",
        usage: help::VERSION_USAGE,
    },
    CommandDescriptor {
        name: "plot",
        handler: plot::command_plot,
        required_args: 1,
        summary: "plots single or multi NURBS curves or surfaces",
        usage: plot::PLOT_USAGE,
    },
];

/// Find a command by its exact name
pub fn find_command(name: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|c| c.name == name)
}
