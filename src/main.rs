/*!
 * Nova Kernel - Main Entry Point
 *
 * Minimal interactive wiring: builds the kernel context, registers the
 * built-in command set, bridges the event bus to the dispatcher, and
 * feeds stdin lines through dispatch.
 */

use nova_kernel::{
    init_tracing, register_builtin_commands, spawn_command_bridge, CommandDispatcher, Kernel,
    KernelConfig,
};
use std::error::Error;
use tokio::io::AsyncBufReadExt;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    info!("Nova kernel starting...");

    let config = KernelConfig::from_env();
    let kernel = Kernel::new(config);

    let dispatcher = CommandDispatcher::new();
    register_builtin_commands(&dispatcher);

    spawn_command_bridge(&kernel, &dispatcher).await?;

    info!("Kernel ready; reading commands from stdin");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    while let Some(line) = lines.next_line().await? {
        let output = dispatcher.dispatch(&kernel, &line);
        if !output.is_empty() {
            println!("{}", output);
        }
    }

    info!("Input closed; shutting down");
    kernel.shutdown().await;
    Ok(())
}
