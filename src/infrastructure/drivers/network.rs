use core::str::FromStr;

use embassy_net::{DhcpConfig, IpAddress, Runner, Stack, StackResources, dns::DnsQueryType};
use embassy_time::{Duration, Timer};
use esp_hal::peripherals::WIFI;
use esp_hal::rng::Rng;
use esp_radio::wifi::{Config as WifiConfig, WifiController, WifiDevice};
use heapless::String;

use crate::infrastructure::config;
use crate::mk_static;

/// One socket for the upload, the rest for DHCP and DNS
const MAX_CONNECTIONS: usize = 4;

#[derive(Debug)]
pub enum NetworkError {
    /// Radio driver failed to start
    Radio,
    /// Hostname does not fit the DHCP option
    Hostname,
    /// Host name could not be resolved
    Dns,
}

pub type NetworkParts = (
    Stack<'static>,
    Runner<'static, WifiDevice<'static>>,
    WifiController<'static>,
);

/// Bring up the radio and create the station network stack
pub fn init_network_stack(wifi_device: WIFI<'static>) -> Result<NetworkParts, NetworkError> {
    let esp_radio_ctrl = mk_static!(
        esp_radio::Controller<'static>,
        esp_radio::init().map_err(|_| NetworkError::Radio)?
    );
    let (controller, interfaces) =
        esp_radio::wifi::new(esp_radio_ctrl, wifi_device, WifiConfig::default())
            .map_err(|_| NetworkError::Radio)?;

    let mut dhcp_config = DhcpConfig::default();
    let hostname =
        String::from_str(config::DEVICE.hostname).map_err(|()| NetworkError::Hostname)?;
    dhcp_config.hostname = Some(hostname);

    let net_config = embassy_net::Config::dhcpv4(dhcp_config);

    let network_resources = mk_static!(
        StackResources<MAX_CONNECTIONS>,
        StackResources::<MAX_CONNECTIONS>::new()
    );
    let (stack, runner) =
        embassy_net::new(interfaces.sta, net_config, network_resources, get_seed());

    Ok((stack, runner, controller))
}

fn get_seed() -> u64 {
    let rng = Rng::new();
    u64::from(rng.random()) << 32 | u64::from(rng.random())
}

/// Wait until the link is up and DHCP handed out an IPv4 address.
pub async fn wait_for_connection(stack: Stack<'_>) -> embassy_net::StaticConfigV4 {
    stack.wait_link_up().await;
    loop {
        stack.wait_config_up().await;
        if let Some(config) = stack.config_v4() {
            return config;
        }
        // Only an IPv6 config so far
        Timer::after(Duration::from_millis(100)).await;
    }
}

/// Resolves a hostname to an IP address
pub(crate) async fn resolve_host(stack: Stack<'static>, host: &str) -> Result<IpAddress, NetworkError> {
    if let Ok(ip) = host.parse::<embassy_net::Ipv4Address>() {
        return Ok(IpAddress::Ipv4(ip));
    }

    let addresses = stack
        .dns_query(host, DnsQueryType::A)
        .await
        .map_err(|_| NetworkError::Dns)?;

    addresses.first().copied().ok_or(NetworkError::Dns)
}
