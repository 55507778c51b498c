use get_if_addrs::get_if_addrs;
use std::collections::HashMap;
use std::net::UdpSocket;

/// Devine l'adresse IP locale de la machine.
///
/// Crée un socket UDP lié à `0.0.0.0:0` et demande au système quelle
/// interface serait utilisée pour joindre `8.8.8.8:80` (aucun trafic n'est
/// réellement émis, UDP est sans connexion). En cas d'échec à n'importe
/// quelle étape, retourne `127.0.0.1`.
///
/// # Returns
///
/// L'adresse IP locale sous forme de `String`, ou `"127.0.0.1"` en cas
/// d'erreur.
pub fn guess_local_ip() -> String {
    match UdpSocket::bind("0.0.0.0:0") {
        Ok(socket) => {
            if socket.connect("8.8.8.8:80").is_ok() {
                if let Ok(local_addr) = socket.local_addr() {
                    return local_addr.ip().to_string();
                }
            }
            "127.0.0.1".to_string()
        }
        Err(_) => "127.0.0.1".to_string(),
    }
}

/// Liste toutes les adresses IPv4 non-loopback des interfaces réseau.
///
/// # Returns
///
/// Une `HashMap` nom d'interface → adresses IP. En cas d'erreur lors de la
/// récupération des interfaces, retourne une HashMap vide.
pub fn list_network_ips() -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();

    if let Ok(interfaces) = get_if_addrs() {
        for iface in interfaces {
            if iface.is_loopback() {
                continue;
            }
            if let get_if_addrs::IfAddr::V4(addr) = &iface.addr {
                result
                    .entry(iface.name.clone())
                    .or_default()
                    .push(addr.ip.to_string());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_local_ip_returns_parseable_address() {
        let ip = guess_local_ip();
        assert!(ip.parse::<std::net::IpAddr>().is_ok());
    }

    #[test]
    fn list_network_ips_excludes_loopback() {
        for ips in list_network_ips().values() {
            for ip in ips {
                assert_ne!(ip, "127.0.0.1");
            }
        }
    }
}
