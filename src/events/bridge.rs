/*!
 * Kernel Command Bridge
 * Routes bus messages through the command dispatcher
 *
 * Publishing `{"command": "<line>"}` on `kernel.command` dispatches the
 * line and publishes `{"result": "<output>"}` on `kernel.response`, so
 * other agents can drive the kernel over the bus instead of the
 * interactive surface.
 */

use super::types::EventResult;
use crate::core::types::SubscriptionId;
use crate::dispatch::CommandDispatcher;
use crate::kernel::Kernel;
use log::warn;
use serde_json::json;

/// Event type carrying command lines into the kernel
pub const KERNEL_COMMAND_EVENT: &str = "kernel.command";

/// Event type carrying dispatch results back out
pub const KERNEL_RESPONSE_EVENT: &str = "kernel.response";

/// Subscribe the dispatcher to `kernel.command`
pub async fn spawn_command_bridge(
    kernel: &Kernel,
    dispatcher: &CommandDispatcher,
) -> EventResult<SubscriptionId> {
    let bridge_kernel = kernel.clone();
    let bridge_dispatcher = dispatcher.clone();
    let bus = kernel.events().clone();

    kernel
        .events()
        .subscribe(
            KERNEL_COMMAND_EVENT,
            Box::new(move |data| {
                let Some(line) = data.get("command").and_then(|v| v.as_str()) else {
                    warn!("Ignoring malformed kernel.command payload: {}", data);
                    return;
                };
                let result = bridge_dispatcher.dispatch(&bridge_kernel, line);
                bus.publish(KERNEL_RESPONSE_EVENT, json!({ "result": result }));
            }),
        )
        .await
}
