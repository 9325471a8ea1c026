//! Nexbridge - display upload bridge firmware
//!
//! Sits between a display authoring tool and a serial display. Finds the
//! display's baud rate, answers the tool's connect handshake on its behalf,
//! then passes the firmware upload through at the rate the tool asks for.
//!
//! All four USARTs are interrupt driven through static queues; a TC1
//! compare interrupt provides the millisecond tick.

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use panic_halt as _;

use nexbridge_core::{Bridge, Port, SerialChannel, State, TickCounter};
use nexbridge_hal_atmega2560::{StatusLed, TickTimer, Usart0, Usart1, Usart2, Usart3};

use crate::console::Console;

mod board;
mod console;

// Queues shared with the interrupt handlers
static HOST_PORT: Port = Port::new();
static IDLE_PORT: Port = Port::new();
static DISPLAY_PORT: Port = Port::new();
static DEBUG_PORT: Port = Port::new();

static TICKS: TickCounter = TickCounter::new();

#[avr_device::interrupt(atmega2560)]
fn USART0_RX() {
    Usart0::on_receive(&HOST_PORT);
}

#[avr_device::interrupt(atmega2560)]
fn USART0_UDRE() {
    Usart0::on_data_register_empty(&HOST_PORT);
}

#[avr_device::interrupt(atmega2560)]
fn USART1_RX() {
    Usart1::on_receive(&IDLE_PORT);
}

#[avr_device::interrupt(atmega2560)]
fn USART1_UDRE() {
    Usart1::on_data_register_empty(&IDLE_PORT);
}

#[avr_device::interrupt(atmega2560)]
fn USART2_RX() {
    Usart2::on_receive(&DISPLAY_PORT);
}

#[avr_device::interrupt(atmega2560)]
fn USART2_UDRE() {
    Usart2::on_data_register_empty(&DISPLAY_PORT);
}

#[avr_device::interrupt(atmega2560)]
fn USART3_RX() {
    Usart3::on_receive(&DEBUG_PORT);
}

#[avr_device::interrupt(atmega2560)]
fn USART3_UDRE() {
    Usart3::on_data_register_empty(&DEBUG_PORT);
}

#[avr_device::interrupt(atmega2560)]
fn TIMER1_COMPA() {
    TickTimer::on_compare(board::TICK_RELOAD);
    TICKS.tick();
}

#[avr_device::entry]
fn main() -> ! {
    // No recovery is possible without the peripherals
    let dp = avr_device::atmega2560::Peripherals::take().unwrap();

    let divisor = board::BOOT_RATE.programmed();
    let host = SerialChannel::new(&HOST_PORT, Usart0::new(dp.USART0, divisor));
    // Wired on the board but unused; kept configured so line noise lands
    // in its queue instead of resetting through an unhandled vector
    let _idle = Usart1::new(dp.USART1, divisor);
    let display = SerialChannel::new(&DISPLAY_PORT, Usart2::new(dp.USART2, divisor));
    let mut debug = Console::new(SerialChannel::new(
        &DEBUG_PORT,
        Usart3::new(dp.USART3, divisor),
    ));

    let led = StatusLed::new(dp.PORTB);
    let _timer = TickTimer::start(dp.TC1, board::TICK_RELOAD);

    // SAFETY: every static the handlers touch is initialized
    unsafe { avr_device::interrupt::enable() };

    let _ = ufmt::uwrite!(debug, "Hello\r\n");

    let config = match board::BRIDGE_CONFIG.validate() {
        Ok(()) => board::BRIDGE_CONFIG,
        Err(_) => {
            let _ = ufmt::uwrite!(debug, "bad board config, using defaults\r\n");
            Default::default()
        }
    };

    let mut bridge = Bridge::new(host, display, &TICKS, led, config);

    loop {
        let previous = bridge.state();
        let state = bridge.step();
        if state == previous {
            continue;
        }

        let _ = ufmt::uwrite!(
            debug,
            "{} -> {}\r\n",
            console::state_name(previous),
            console::state_name(state)
        );

        match state {
            State::Listening(rate) if previous == State::Probing => {
                let _ = ufmt::uwrite!(
                    debug,
                    "display at index {} ({} baud), signature {} bytes\r\n",
                    rate.get(),
                    rate.baud(),
                    bridge.signature().len()
                );
            }
            State::RestoreRate(_) => {
                if let Some(report) = bridge.last_relay() {
                    let _ = ufmt::uwrite!(
                        debug,
                        "relay {} at {} baud: {} to display, {} to host\r\n",
                        console::outcome_name(report.outcome),
                        report.rate.baud(),
                        report.to_display,
                        report.to_host
                    );
                }
            }
            State::Probing if matches!(previous, State::RestoreRate(_)) => {
                let _ = ufmt::uwrite!(
                    debug,
                    "overruns: host {}, display {}\r\n",
                    HOST_PORT.overruns(),
                    DISPLAY_PORT.overruns()
                );
            }
            _ => {}
        }
    }
}
