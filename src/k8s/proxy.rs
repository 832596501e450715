//! Docker proxy settings forwarded into the minikube VM

use url::{ParseError, Url};

/// Always excluded from proxying: the default minikube VM network
pub const PRIVATE_SUBNET: &str = "192.168.0.0/16";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEnv {
    pub http_proxy: String,
    pub https_proxy: String,
    pub no_proxy: String,
}

impl ProxyEnv {
    /// Derive the docker proxy variables from a proxy URL.
    ///
    /// A proxy without a scheme (`proxy.local:3128`) is accepted with a
    /// warning and an empty host in `no_proxy`. Anything else `url` rejects is
    /// returned as an error.
    pub fn from_proxy(proxy: &str) -> Result<Self, ParseError> {
        let host = match Url::parse(proxy) {
            Ok(_) => proxy_host(proxy),
            Err(ParseError::RelativeUrlWithoutBase) => None,
            Err(err) => return Err(err),
        };

        let host = host.map(str::to_string).unwrap_or_else(|| {
            crate::log_warn!("could not parse proxy host. did you forget \"http://\"?");
            String::new()
        });

        Ok(Self {
            http_proxy: proxy.to_string(),
            https_proxy: proxy.replacen("http://", "https://", 1),
            no_proxy: format!("{},{}", host, PRIVATE_SUBNET),
        })
    }

    /// `name=value` pairs in the order minikube receives them
    pub fn assignments(&self) -> [String; 3] {
        [
            format!("http_proxy={}", self.http_proxy),
            format!("https_proxy={}", self.https_proxy),
            format!("no_proxy={}", self.no_proxy),
        ]
    }
}

/// Host name exactly as written in `proxy`, without userinfo, port or IPv6
/// brackets. `None` when there is no `//` authority.
fn proxy_host(proxy: &str) -> Option<&str> {
    let (_, rest) = proxy.trim().split_once(':')?;
    let authority = rest.strip_prefix("//")?;
    let authority = authority
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);

    let host = match host_port.strip_prefix('[') {
        Some(bracketed) => bracketed.split_once(']').map_or(bracketed, |(h, _)| h),
        None => host_port.rsplit_once(':').map_or(host_port, |(h, _)| h),
    };

    (!host.is_empty()).then_some(host)
}
