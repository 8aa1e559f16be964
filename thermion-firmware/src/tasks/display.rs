//! Display controller task
//!
//! Runs the session at a fixed tick, feeds it whatever arrived on the
//! channels since the last tick, and shifts the resulting frame out to
//! the panel.

use defmt::*;
use embassy_time::{Duration, Ticker};
use esp_hal::delay::Delay;

use thermion_core::config::SessionConfig;
use thermion_core::display::{encode, SymbolTable};
use thermion_core::session::DisplaySession;
use thermion_drivers::FrameTransmitter;

use crate::channels::{LinkEvent, FETCH_REQUEST, FETCH_RESULTS, LINK_EVENTS, OVERRIDES};
use crate::pins::LinkPin;

/// Session tick period; animation and disconnect cadences are multiples
/// of this
pub const TICK_MS: u64 = 500;

/// Transmitter over the board's link pins
pub type LinkTransmitter = FrameTransmitter<LinkPin, Delay>;

#[embassy_executor::task]
pub async fn display_task(mut tx: LinkTransmitter, config: SessionConfig) {
    let table = SymbolTable::new();
    let mut session = DisplaySession::new(config);
    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    let mut last_state = session.state();

    info!("display controller starting (tick={}ms)", TICK_MS);

    loop {
        ticker.next().await;

        // Drain everything that arrived since the last tick.
        while let Ok(event) = LINK_EVENTS.try_receive() {
            match event {
                LinkEvent::Up => session.link_up(),
                LinkEvent::Down => session.link_down(),
            }
        }
        while let Ok(result) = FETCH_RESULTS.try_receive() {
            match result {
                Some(v) => info!("fetch result: {}°C", v),
                None => warn!("fetch failed"),
            }
            session.record_fetch(result);
        }
        while let Ok(value) = OVERRIDES.try_receive() {
            match session.apply_override(value) {
                Ok(()) => info!("override applied: {}°C", value),
                Err(err) => warn!("override rejected: {} ({})", value, err),
            }
        }

        let out = session.tick();
        if out.fetch_due {
            FETCH_REQUEST.signal(());
        }

        if session.state() != last_state {
            info!("session state: {} -> {}", last_state, session.state());
            last_state = session.state();
        }

        match encode(&table, out.value) {
            Ok(frame) => tx.transmit(&frame),
            // The session only hands out encodable values.
            Err(err) => error!("encode failed: {}", err),
        }
    }
}
