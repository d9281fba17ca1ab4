//! Motion task
//!
//! Owns the arm controller. Runs the soft-start ramp once, then steps every
//! joint on a fixed ticker and applies incoming commands between ticks.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Duration, Ticker};

use braccio_core::ArmController;
use braccio_drivers::{HalOutputPin, PwmServo};

use crate::channels::{ARM_COMMANDS, ARM_SETTLED};
use crate::clock::EmbassyClock;

/// Controller type wired to the RP2040 peripherals
pub type FirmwareArm =
    ArmController<PwmServo<PwmOutput<'static>>, HalOutputPin<Output<'static>>, EmbassyClock>;

/// Arm motion task
#[embassy_executor::task]
pub async fn motion_task(mut arm: FirmwareArm, snap_to_center: bool) {
    info!("Motion task started");

    // Blocks the executor for the ~6 s ramp; nothing else may move the arm yet
    let outcome = arm.start(snap_to_center);
    info!(
        "Soft start done: {}ms, {} pulses",
        outcome.elapsed_ms(),
        outcome.pulses()
    );
    if !snap_to_center {
        warn!("Started without snapping to center, joints hold until set_all_now");
    }

    ARM_SETTLED.signal(arm.is_settled());
    let mut was_settled = arm.is_settled();

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(arm.tick_ms())));

    loop {
        match select(ticker.next(), ARM_COMMANDS.receive()).await {
            Either::First(()) => {
                let written = arm.update();
                if written > 0 {
                    trace!("Tick: {} joints stepped", written);
                }
            }
            Either::Second(cmd) => {
                let result = cmd.apply(&mut arm);
                if result.is_applied() {
                    debug!("Command {:?} applied", cmd);
                } else {
                    warn!("Command {:?} clamped: {:?}", cmd, result);
                }
                ARM_SETTLED.signal(arm.is_settled());
            }
        }

        let settled = arm.is_settled();
        if settled != was_settled {
            debug!("Arm {}", if settled { "settled" } else { "moving" });
            ARM_SETTLED.signal(settled);
            was_settled = settled;
        }
    }
}
