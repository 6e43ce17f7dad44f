/*!
 * Command Dispatcher
 * Parses command lines and routes them to registered handlers
 *
 * The dispatcher is the terminal error boundary for interactive use:
 * whatever a handler does internally, dispatch returns a display string
 * and never faults out to its caller.
 */

use super::types::CommandResult;
use crate::kernel::Kernel;
use log::{error, info};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Weak};

/// A named command handler
pub trait Command: Send + Sync {
    fn execute(&self, kernel: &Kernel, args: &[String]) -> CommandResult<String>;
}

struct Registration {
    command: Arc<dyn Command>,
    description: String,
}

#[derive(Default)]
struct Registry {
    by_name: HashMap<String, Registration>,
    // Registration order, for help output
    order: Vec<String>,
}

/// Command registry and dispatch loop entry point
pub struct CommandDispatcher {
    registry: Arc<RwLock<Registry>>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry::default())),
        }
    }

    /// Register a command handler
    ///
    /// Last registration for a name wins, so later-loaded modules can
    /// progressively replace built-ins.
    pub fn register(
        &self,
        name: impl Into<String>,
        command: Arc<dyn Command>,
        description: impl Into<String>,
    ) {
        let name = name.into();
        let mut registry = self.registry.write();
        let replaced = registry
            .by_name
            .insert(
                name.clone(),
                Registration {
                    command,
                    description: description.into(),
                },
            )
            .is_some();
        if !replaced {
            registry.order.push(name.clone());
        }
        info!("Registered command \"{}\"", name);
    }

    /// Dispatch one command line
    ///
    /// Tokenizes on whitespace; token 0 names the command, the rest are
    /// positional arguments. Always returns a display string.
    pub fn dispatch(&self, kernel: &Kernel, line: &str) -> String {
        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        let Some((name, args)) = tokens.split_first() else {
            return "No command entered.".to_string();
        };

        let command = {
            let registry = self.registry.read();
            registry.by_name.get(name).map(|r| Arc::clone(&r.command))
        };
        let Some(command) = command else {
            return format!(
                "Command not recognized: {}. Type \"help\" for a list of commands.",
                name
            );
        };

        match catch_unwind(AssertUnwindSafe(|| command.execute(kernel, args))) {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => format!("Error executing command \"{}\": {}", name, err),
            Err(_) => {
                error!("Handler for \"{}\" panicked", name);
                format!("Error executing command \"{}\": internal fault", name)
            }
        }
    }

    /// Formatted help text, in registration order
    pub fn help(&self) -> String {
        let registry = self.registry.read();
        let mut text = String::from("Available commands:\n");
        for name in &registry.order {
            if let Some(registration) = registry.by_name.get(name) {
                text.push_str(&format!("  {}: {}\n", name, registration.description));
            }
        }
        text
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.read().by_name.contains_key(name)
    }

    /// Non-owning handle to this dispatcher
    ///
    /// A command stored in the registry must not hold the registry alive
    /// through itself; give it this instead of a clone.
    pub fn downgrade(&self) -> WeakDispatcher {
        WeakDispatcher {
            registry: Arc::downgrade(&self.registry),
        }
    }
}

/// Weak counterpart to `CommandDispatcher`
pub struct WeakDispatcher {
    registry: Weak<RwLock<Registry>>,
}

impl WeakDispatcher {
    pub fn upgrade(&self) -> Option<CommandDispatcher> {
        self.registry
            .upgrade()
            .map(|registry| CommandDispatcher { registry })
    }
}

impl Clone for CommandDispatcher {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
