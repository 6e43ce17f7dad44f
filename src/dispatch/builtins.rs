/*!
 * Built-in Commands
 * The default command set routed onto kernel operations
 */

use super::dispatcher::{Command, CommandDispatcher, WeakDispatcher};
use super::types::{CommandError, CommandResult};
use crate::core::types::Pid;
use crate::kernel::Kernel;
use log::debug;
use std::sync::Arc;

fn parse_pid(token: &str) -> CommandResult<Pid> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidArgument(format!("invalid process id: {}", token)))
}

fn parse_size(token: &str) -> CommandResult<u64> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidArgument(format!("invalid size: {}", token)))
}

struct Help {
    // Weak: the registry holds this command, so an owning clone would cycle
    dispatcher: WeakDispatcher,
}

impl Command for Help {
    fn execute(&self, _kernel: &Kernel, _args: &[String]) -> CommandResult<String> {
        // Always upgradable during dispatch; the caller owns the registry
        let dispatcher = self
            .dispatcher
            .upgrade()
            .ok_or_else(|| CommandError::Kernel("command registry dropped".into()))?;
        Ok(dispatcher.help())
    }
}

struct ListProcesses;

impl Command for ListProcesses {
    fn execute(&self, kernel: &Kernel, _args: &[String]) -> CommandResult<String> {
        let processes = kernel.processes().list();
        if processes.is_empty() {
            return Ok("No processes.".to_string());
        }
        let lines: Vec<String> = processes
            .iter()
            .map(|p| {
                format!(
                    "PID {}  {}  status={}  mem={}",
                    p.pid, p.name, p.status, p.memory_allocated
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

struct StartProcess;

impl Command for StartProcess {
    fn execute(&self, kernel: &Kernel, args: &[String]) -> CommandResult<String> {
        let name = args
            .first()
            .ok_or(CommandError::Usage("start_process <name>"))?
            .clone();
        let task_name = name.clone();
        let process = kernel.processes().spawn(
            name,
            Box::new(move || {
                debug!("{} process is running...", task_name);
                Ok(())
            }),
        );
        Ok(format!(
            "Started process '{}' with PID {}.",
            process.name, process.pid
        ))
    }
}

struct StopProcess;

impl Command for StopProcess {
    fn execute(&self, kernel: &Kernel, args: &[String]) -> CommandResult<String> {
        let token = args
            .first()
            .ok_or(CommandError::Usage("stop_process <pid>"))?;
        let pid = parse_pid(token)?;
        Ok(if kernel.processes().stop(pid) {
            format!("Process {} stopped successfully.", pid)
        } else {
            format!("Process {} not found.", pid)
        })
    }
}

struct ReadFile;

impl Command for ReadFile {
    fn execute(&self, kernel: &Kernel, args: &[String]) -> CommandResult<String> {
        let path = args.first().ok_or(CommandError::Usage("read_file <path>"))?;
        let content = kernel.vfs().read(path)?;
        Ok(String::from_utf8_lossy(&content).into_owned())
    }
}

struct WriteFile;

impl Command for WriteFile {
    fn execute(&self, kernel: &Kernel, args: &[String]) -> CommandResult<String> {
        if args.len() < 2 {
            return Err(CommandError::Usage("write_file <path> <content>"));
        }
        let path = &args[0];
        let content = args[1..].join(" ");
        let bytes = content.into_bytes();
        let written = bytes.len();
        kernel.vfs().write(path, bytes)?;
        Ok(format!("Wrote {} bytes to {}.", written, path))
    }
}

struct DeleteFile;

impl Command for DeleteFile {
    fn execute(&self, kernel: &Kernel, args: &[String]) -> CommandResult<String> {
        let path = args
            .first()
            .ok_or(CommandError::Usage("delete_file <path>"))?;
        kernel.vfs().delete(path)?;
        Ok(format!("Deleted {}.", path))
    }
}

struct ListFiles;

impl Command for ListFiles {
    fn execute(&self, kernel: &Kernel, _args: &[String]) -> CommandResult<String> {
        let files = kernel.vfs().list();
        if files.is_empty() {
            return Ok("No files.".to_string());
        }
        Ok(files.join("\n"))
    }
}

struct AllocateMemory;

impl Command for AllocateMemory {
    fn execute(&self, kernel: &Kernel, args: &[String]) -> CommandResult<String> {
        if args.len() < 2 {
            return Err(CommandError::Usage("allocate_memory <pid> <size>"));
        }
        let pid = parse_pid(&args[0])?;
        let size = parse_size(&args[1])?;
        kernel.processes().allocate_memory(pid, size)?;
        Ok(format!("Allocated {} bytes for process {}.", size, pid))
    }
}

struct FreeMemory;

impl Command for FreeMemory {
    fn execute(&self, kernel: &Kernel, args: &[String]) -> CommandResult<String> {
        let token = args
            .first()
            .ok_or(CommandError::Usage("free_memory <pid>"))?;
        let pid = parse_pid(token)?;
        kernel.processes().free_memory(pid)?;
        Ok(format!("Freed memory for process {}.", pid))
    }
}

struct CallService;

impl Command for CallService {
    fn execute(&self, kernel: &Kernel, args: &[String]) -> CommandResult<String> {
        let (name, service_args) = args
            .split_first()
            .ok_or(CommandError::Usage("call_service <name> [args...]"))?;
        // Propagate the service's success or failure unchanged
        Ok(kernel.services().call(name, service_args)?)
    }
}

struct Broadcast;

impl Command for Broadcast {
    fn execute(&self, kernel: &Kernel, args: &[String]) -> CommandResult<String> {
        if args.is_empty() {
            return Err(CommandError::Usage("broadcast <message>"));
        }
        let message = args.join(" ");
        let delivered = kernel.broadcast(&message);
        Ok(format!(
            "Broadcast delivered to {} running processes.",
            delivered
        ))
    }
}

/// Register the default command set
pub fn register_builtin_commands(dispatcher: &CommandDispatcher) {
    dispatcher.register(
        "help",
        Arc::new(Help {
            dispatcher: dispatcher.downgrade(),
        }),
        "Lists all available commands.",
    );
    dispatcher.register(
        "list_processes",
        Arc::new(ListProcesses),
        "Lists all processes.",
    );
    dispatcher.register(
        "start_process",
        Arc::new(StartProcess),
        "Starts a new process with a given name.",
    );
    dispatcher.register(
        "stop_process",
        Arc::new(StopProcess),
        "Stops a running process by its ID.",
    );
    dispatcher.register(
        "read_file",
        Arc::new(ReadFile),
        "Reads a file from the virtual file system.",
    );
    dispatcher.register(
        "write_file",
        Arc::new(WriteFile),
        "Writes content to a file in the virtual file system.",
    );
    dispatcher.register(
        "delete_file",
        Arc::new(DeleteFile),
        "Deletes a file from the virtual file system.",
    );
    dispatcher.register(
        "list_files",
        Arc::new(ListFiles),
        "Lists all files in the virtual file system.",
    );
    dispatcher.register(
        "allocate_memory",
        Arc::new(AllocateMemory),
        "Allocates memory for a process.",
    );
    dispatcher.register(
        "free_memory",
        Arc::new(FreeMemory),
        "Frees the memory allocated for a process.",
    );
    dispatcher.register(
        "call_service",
        Arc::new(CallService),
        "Calls a registered kernel service with optional arguments.",
    );
    dispatcher.register(
        "broadcast",
        Arc::new(Broadcast),
        "Broadcasts a message to all running processes.",
    );
}
