//! Inter-task communication channels
//!
//! The motion task is the only owner of the arm controller. Other tasks send
//! commands here and watch the settled signal.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use braccio_core::ArmCommand;

/// Channel capacity for arm commands
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Commands for the motion task
pub static ARM_COMMANDS: Channel<CriticalSectionRawMutex, ArmCommand, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Latest "all joints settled" state, published after every command and
/// whenever motion starts or stops
///
/// Joints never written since start count as settled, so after a start
/// without snapping to center this reads `true` until `SetAllNow` arrives.
pub static ARM_SETTLED: Signal<CriticalSectionRawMutex, bool> = Signal::new();
