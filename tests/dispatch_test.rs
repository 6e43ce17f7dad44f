/*!
 * Dispatch Tests
 * End-to-end command handling against a live kernel
 */

use nova_kernel::dispatch::{Command, CommandResult};
use nova_kernel::services::ServiceError;
use nova_kernel::{register_builtin_commands, CommandDispatcher, Kernel, KernelConfig};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn setup() -> (Kernel, CommandDispatcher) {
    let kernel = Kernel::new(KernelConfig::default());
    let dispatcher = CommandDispatcher::new();
    register_builtin_commands(&dispatcher);
    (kernel, dispatcher)
}

#[tokio::test]
async fn test_empty_input() {
    let (kernel, dispatcher) = setup();
    assert_eq!(dispatcher.dispatch(&kernel, ""), "No command entered.");
    assert_eq!(dispatcher.dispatch(&kernel, "   "), "No command entered.");
    kernel.shutdown().await;
}

#[tokio::test]
async fn test_unknown_command() {
    let (kernel, dispatcher) = setup();
    assert_eq!(
        dispatcher.dispatch(&kernel, "nope"),
        "Command not recognized: nope. Type \"help\" for a list of commands."
    );
    kernel.shutdown().await;
}

#[tokio::test]
async fn test_process_lifecycle_via_commands() {
    let (kernel, dispatcher) = setup();

    assert_eq!(
        dispatcher.dispatch(&kernel, "start_process web"),
        "Started process 'web' with PID 1."
    );
    assert_eq!(
        dispatcher.dispatch(&kernel, "stop_process 1"),
        "Process 1 stopped successfully."
    );
    // Stopping again reports not found rather than raising
    assert_eq!(
        dispatcher.dispatch(&kernel, "stop_process 1"),
        "Process 1 not found."
    );

    let listing = dispatcher.dispatch(&kernel, "list_processes");
    assert!(listing.contains("PID 1"));
    assert!(listing.contains("status=stopped"));

    kernel.shutdown().await;
}

#[tokio::test]
async fn test_file_commands() {
    let (kernel, dispatcher) = setup();

    assert_eq!(
        dispatcher.dispatch(&kernel, "write_file /notes hello there"),
        "Wrote 11 bytes to /notes."
    );
    assert_eq!(dispatcher.dispatch(&kernel, "read_file /notes"), "hello there");
    assert_eq!(dispatcher.dispatch(&kernel, "list_files"), "/notes");
    assert_eq!(dispatcher.dispatch(&kernel, "delete_file /notes"), "Deleted /notes.");
    assert_eq!(
        dispatcher.dispatch(&kernel, "read_file /notes"),
        "Error executing command \"read_file\": File system error: File not found: /notes"
    );
    assert_eq!(dispatcher.dispatch(&kernel, "list_files"), "No files.");

    kernel.shutdown().await;
}

#[tokio::test]
async fn test_memory_commands() {
    let (kernel, dispatcher) = setup();

    dispatcher.dispatch(&kernel, "start_process app");
    assert_eq!(
        dispatcher.dispatch(&kernel, "allocate_memory 1 4096"),
        "Allocated 4096 bytes for process 1."
    );
    assert!(dispatcher
        .dispatch(&kernel, "list_processes")
        .contains("mem=4096"));
    assert_eq!(
        dispatcher.dispatch(&kernel, "free_memory 1"),
        "Freed memory for process 1."
    );
    assert!(dispatcher
        .dispatch(&kernel, "allocate_memory abc 10")
        .starts_with("Error executing command \"allocate_memory\""));

    kernel.shutdown().await;
}

#[tokio::test]
async fn test_missing_arguments_report_usage() {
    let (kernel, dispatcher) = setup();
    assert_eq!(
        dispatcher.dispatch(&kernel, "start_process"),
        "Error executing command \"start_process\": Usage: start_process <name>"
    );
    kernel.shutdown().await;
}

#[tokio::test]
async fn test_help_lists_commands_in_registration_order() {
    let (kernel, dispatcher) = setup();

    let help = dispatcher.dispatch(&kernel, "help");
    assert!(help.starts_with("Available commands:\n"));
    assert!(help.contains("  help: Lists all available commands.\n"));

    let help_pos = help.find("  help:").unwrap();
    let list_pos = help.find("  list_processes:").unwrap();
    let broadcast_pos = help.find("  broadcast:").unwrap();
    assert!(help_pos < list_pos && list_pos < broadcast_pos);

    kernel.shutdown().await;
}

#[tokio::test]
async fn test_call_service_echo_and_uptime() {
    let (kernel, dispatcher) = setup();

    assert_eq!(
        dispatcher.dispatch(&kernel, "call_service echo one two"),
        "one two"
    );
    assert!(dispatcher
        .dispatch(&kernel, "call_service uptime")
        .ends_with('s'));
    assert!(dispatcher
        .dispatch(&kernel, "call_service missing")
        .starts_with("Error executing command \"call_service\""));

    kernel.shutdown().await;
}

#[tokio::test]
async fn test_duplicate_service_registration_rejected() {
    let (kernel, _dispatcher) = setup();

    let result = kernel
        .services()
        .register("echo", Arc::new(|args: &[String]| Ok(args.join(" "))));
    assert_eq!(
        result,
        Err(ServiceError::AlreadyRegistered("echo".to_string()))
    );

    kernel.shutdown().await;
}

#[tokio::test]
async fn test_panicking_handler_is_contained() {
    let (kernel, dispatcher) = setup();

    struct Explode;
    impl Command for Explode {
        fn execute(&self, _kernel: &Kernel, _args: &[String]) -> CommandResult<String> {
            panic!("handler bug");
        }
    }
    dispatcher.register("explode", Arc::new(Explode), "Always panics.");

    assert_eq!(
        dispatcher.dispatch(&kernel, "explode"),
        "Error executing command \"explode\": internal fault"
    );
    // Dispatcher still works afterwards
    assert_eq!(dispatcher.dispatch(&kernel, "call_service echo ok"), "ok");

    kernel.shutdown().await;
}

#[tokio::test]
async fn test_last_registration_wins() {
    let (kernel, dispatcher) = setup();

    struct Fixed(&'static str);
    impl Command for Fixed {
        fn execute(&self, _kernel: &Kernel, _args: &[String]) -> CommandResult<String> {
            Ok(self.0.to_string())
        }
    }

    dispatcher.register("greet", Arc::new(Fixed("hello")), "Greets.");
    dispatcher.register("greet", Arc::new(Fixed("bonjour")), "Greets, but French.");

    assert_eq!(dispatcher.dispatch(&kernel, "greet"), "bonjour");
    // Overriding does not duplicate the help entry
    let help = dispatcher.dispatch(&kernel, "help");
    assert_eq!(help.matches("  greet:").count(), 1);

    kernel.shutdown().await;
}

#[tokio::test]
async fn test_dropping_dispatcher_releases_registry() {
    let (kernel, dispatcher) = setup();

    // help still works through the weak self-reference
    assert!(dispatcher
        .dispatch(&kernel, "help")
        .starts_with("Available commands:"));

    let weak = dispatcher.downgrade();
    assert!(weak.upgrade().is_some());

    // No registered command (help included) keeps the registry alive
    drop(dispatcher);
    assert!(weak.upgrade().is_none());

    kernel.shutdown().await;
}

#[tokio::test]
async fn test_broadcast_command() {
    let (kernel, dispatcher) = setup();

    dispatcher.dispatch(&kernel, "start_process a");
    dispatcher.dispatch(&kernel, "start_process b");
    dispatcher.dispatch(&kernel, "stop_process 2");

    assert_eq!(
        dispatcher.dispatch(&kernel, "broadcast system going down"),
        "Broadcast delivered to 1 running processes."
    );

    kernel.shutdown().await;
}
