use std::{
	net::{IpAddr, Ipv4Addr, SocketAddr},
	path::PathBuf
};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
	#[error("{key} is set to '{value}', which isn't valid")]
	Invalid { key: &'static str, value: String },
	#[error("DIST_DIR ({}) doesn't contain an index.html; build the frontend first (trunk build --release)", .0.display())]
	NoIndex(PathBuf)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostConfig {
	pub addr: SocketAddr,
	pub dist_dir: PathBuf
}

impl HostConfig {
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| dotenv::var(key).ok())
	}

	fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
		macro_rules! parsed_var{
			($key:expr, $default:expr) => {
				match lookup($key).filter(|v| !v.is_empty()) {
					None => $default,
					Some(value) => value.parse()
						.map_err(|_| ConfigError::Invalid { key: $key, value })?
				}
			}
		}

		let ip: IpAddr = parsed_var!("HOST_ADDR", IpAddr::V4(Ipv4Addr::LOCALHOST));
		let port: u16 = parsed_var!("HOST_PORT", 8080);
		let dist_dir: PathBuf = parsed_var!("DIST_DIR", PathBuf::from("frontend/dist"));

		if !dist_dir.join("index.html").is_file() {
			return Err(ConfigError::NoIndex(dist_dir));
		}

		Ok(Self { addr: SocketAddr::new(ip, port), dist_dir })
	}
}
