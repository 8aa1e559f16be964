//! Wi-Fi management and temperature fetching
//!
//! One task keeps the station association alive and reports link state
//! changes; another waits for fetch requests from the display controller
//! and performs a single HTTP GET against the temperature source.

use core::fmt::Write as _;

use alloc::string::String;
use defmt::*;
use embassy_executor::Spawner;
use embassy_net::dns::DnsQueryType;
use embassy_net::tcp::TcpSocket;
use embassy_net::{Config as NetConfig, DhcpConfig, Stack, StackResources};
use embassy_time::{Duration, Timer};
use esp_hal::peripherals::WIFI;
use esp_hal::rng::Rng;
use esp_radio::wifi::{self, ClientConfig, ModeConfig, WifiController, WifiDevice, WifiEvent};
use esp_radio::{init as radio_init, Controller as RadioController};
use static_cell::StaticCell;

use crate::channels::{LinkEvent, FETCH_REQUEST, FETCH_RESULTS, LINK_EVENTS};
use crate::{SOURCE_HOST, SOURCE_PATH, SOURCE_PORT, WIFI_PSK, WIFI_SSID};

static RADIO_CONTROLLER: StaticCell<RadioController<'static>> = StaticCell::new();
// One socket for the fetch, one for the HTTP endpoint, plus DHCP/DNS.
static NET_RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();

/// Bring up the radio and network stack and spawn the network tasks.
///
/// If radio init fails the display still runs; it just stays in the
/// disconnected state.
pub fn spawn_network(spawner: &Spawner, wifi_peripheral: WIFI<'static>) {
    let radio = match radio_init() {
        Ok(ctrl) => ctrl,
        Err(err) => {
            warn!("Wi-Fi radio init failed; display stays offline: {:?}", err);
            return;
        }
    };
    let radio_ctrl = RADIO_CONTROLLER.init(radio);

    let (wifi_controller, wifi_interfaces) =
        match wifi::new(radio_ctrl, wifi_peripheral, Default::default()) {
            Ok(v) => v,
            Err(err) => {
                warn!("Wi-Fi driver init failed; display stays offline: {:?}", err);
                return;
            }
        };

    let wifi_device: WifiDevice<'static> = wifi_interfaces.sta;

    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    let resources = NET_RESOURCES.init(StackResources::<4>::new());
    let net_cfg = NetConfig::dhcpv4(DhcpConfig::default());
    let (stack, runner) = embassy_net::new(wifi_device, net_cfg, resources, seed);

    spawner
        .spawn(wifi_task(wifi_controller, stack))
        .expect("wifi_task spawn");
    spawner.spawn(net_task(runner)).expect("net_task spawn");
    spawner.spawn(fetch_task(stack)).expect("fetch_task spawn");
    spawner
        .spawn(super::server::http_task(stack))
        .expect("http_task spawn");
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}

#[embassy_executor::task]
async fn wifi_task(mut controller: WifiController<'static>, stack: Stack<'static>) {
    info!("Wi-Fi task starting (ssid=\"{}\")", WIFI_SSID);

    let ssid = String::from(WIFI_SSID);
    let password = String::from(WIFI_PSK);

    loop {
        let client_config = ModeConfig::Client(
            ClientConfig::default()
                .with_ssid(ssid.clone())
                .with_password(password.clone()),
        );

        if !matches!(controller.is_started(), Ok(true)) {
            if let Err(err) = controller.set_config(&client_config) {
                warn!("Wi-Fi set_config error: {:?}", err);
                Timer::after(Duration::from_secs(10)).await;
                continue;
            }
            if let Err(err) = controller.start_async().await {
                warn!("Wi-Fi start_async error: {:?}", err);
                Timer::after(Duration::from_secs(10)).await;
                continue;
            }
        }

        match controller.connect_async().await {
            Ok(()) => {
                // Associated; wait for DHCP before declaring the link up.
                let mut retries: u8 = 0;
                while !stack.is_config_up() && retries < 30 {
                    retries = retries.saturating_add(1);
                    Timer::after(Duration::from_millis(500)).await;
                }

                if !stack.is_config_up() {
                    warn!("Wi-Fi DHCP not ready within timeout");
                    Timer::after(Duration::from_secs(5)).await;
                    continue;
                }

                info!("Wi-Fi link up");
                LINK_EVENTS.send(LinkEvent::Up).await;

                controller.wait_for_event(WifiEvent::StaDisconnected).await;
                warn!("Wi-Fi STA disconnected; will retry");
                LINK_EVENTS.send(LinkEvent::Down).await;
                Timer::after(Duration::from_secs(5)).await;
            }
            Err(err) => {
                warn!("Wi-Fi connect error: {:?}", err);
                Timer::after(Duration::from_secs(10)).await;
            }
        }

        Timer::after(Duration::from_millis(100)).await;
    }
}

#[embassy_executor::task]
async fn fetch_task(stack: Stack<'static>) {
    let mut rx_buf = [0u8; 1024];
    let mut tx_buf = [0u8; 512];

    loop {
        FETCH_REQUEST.wait().await;

        if !stack.is_config_up() {
            FETCH_RESULTS.send(None).await;
            continue;
        }

        let result = fetch_reading(stack, &mut rx_buf, &mut tx_buf).await;
        FETCH_RESULTS.send(result).await;
    }
}

/// One HTTP GET against the temperature source.
async fn fetch_reading(
    stack: Stack<'static>,
    rx_buf: &mut [u8],
    tx_buf: &mut [u8],
) -> Option<i16> {
    let address = match stack.dns_query(SOURCE_HOST, DnsQueryType::A).await {
        Ok(addresses) => addresses.first().copied()?,
        Err(err) => {
            warn!("source DNS query failed: {:?}", err);
            return None;
        }
    };

    let mut socket = TcpSocket::new(stack, rx_buf, tx_buf);
    socket.set_timeout(Some(Duration::from_secs(10)));

    if let Err(err) = socket.connect((address, SOURCE_PORT)).await {
        warn!("source connect failed: {:?}", err);
        return None;
    }

    let mut request: heapless::String<256> = heapless::String::new();
    let _ = write!(
        request,
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        SOURCE_PATH, SOURCE_HOST
    );
    if let Err(err) = socket.write(request.as_bytes()).await {
        warn!("source request write failed: {:?}", err);
        return None;
    }

    let mut response = [0u8; 2048];
    let mut total = 0usize;
    loop {
        match socket.read(&mut response[total..]).await {
            Ok(0) => break,
            Ok(n) => {
                total += n;
                if total == response.len() {
                    break;
                }
            }
            Err(err) => {
                warn!("source read failed: {:?}", err);
                return None;
            }
        }
    }
    socket.close();

    let text = core::str::from_utf8(&response[..total]).ok()?;
    parse_temperature_response(text)
}

/// Extract the whole-degree temperature from an HTTP response.
///
/// Accepts a 200 response whose JSON body carries a `"temperature"`
/// number field. Hand-written field scan, same as the override endpoint;
/// no JSON dependency needed for one number.
fn parse_temperature_response(response: &str) -> Option<i16> {
    let status_line = response.lines().next()?;
    if !status_line.contains(" 200 ") {
        warn!("source returned non-200 status");
        return None;
    }

    let body_start = response.find("\r\n\r\n")? + 4;
    let body = &response[body_start..];

    let idx = body.find("\"temperature\"")?;
    let colon = body[idx..].find(':')?;
    let value_str = body[idx + colon + 1..].trim_start();

    // Take sign and integer digits; a fractional part is truncated.
    let mut end = 0usize;
    for (i, ch) in value_str.char_indices() {
        if ch == '-' && i == 0 {
            end = ch.len_utf8();
        } else if ch.is_ascii_digit() {
            end = i + ch.len_utf8();
        } else {
            break;
        }
    }

    value_str[..end].parse::<i16>().ok()
}
