/// Host operating system family, chosen once at startup.
///
/// Every OS-specific decision the scanner makes goes through this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    /// Any other OS, by its Rust target name. Treated as BSD-like.
    Other(&'static str),
}

/// A command whose output names the default gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayCommand {
    pub program: &'static str,
    pub args: &'static [&'static str],
    /// Only lines containing this text carry the gateway.
    pub line_filter: Option<&'static str>,
}

impl Platform {
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &'static str) -> Self {
        match os {
            "linux" => Platform::Linux,
            "macos" => Platform::MacOs,
            "windows" => Platform::Windows,
            other => Platform::Other(other),
        }
    }

    /// Node-style platform identifier reported to the front-end.
    pub fn identifier(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "darwin",
            Platform::Windows => "win32",
            Platform::Other(os) => os,
        }
    }

    pub fn gateway_command(&self) -> GatewayCommand {
        match self {
            Platform::Linux => GatewayCommand {
                program: "ip",
                args: &["route", "show", "default"],
                line_filter: None,
            },
            Platform::MacOs | Platform::Other(_) => GatewayCommand {
                program: "route",
                args: &["-n", "get", "default"],
                line_filter: None,
            },
            // `ipconfig | findstr "Default Gateway"`, with the findstr step
            // applied to the captured output.
            Platform::Windows => GatewayCommand {
                program: "ipconfig",
                args: &[],
                line_filter: Some("Default Gateway"),
            },
        }
    }

    pub fn python_command(&self) -> &'static str {
        match self {
            Platform::Windows => "python",
            _ => "python3",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_match_node_platform_names() {
        assert_eq!(Platform::from_os("linux").identifier(), "linux");
        assert_eq!(Platform::from_os("macos").identifier(), "darwin");
        assert_eq!(Platform::from_os("windows").identifier(), "win32");
        assert_eq!(Platform::from_os("freebsd").identifier(), "freebsd");
    }

    #[test]
    fn test_gateway_commands() {
        assert_eq!(Platform::Linux.gateway_command().program, "ip");
        assert_eq!(Platform::MacOs.gateway_command().args, &["-n", "get", "default"]);
        assert_eq!(Platform::Other("openbsd").gateway_command().program, "route");

        let windows = Platform::Windows.gateway_command();
        assert_eq!(windows.program, "ipconfig");
        assert_eq!(windows.line_filter, Some("Default Gateway"));
    }

    #[test]
    fn test_python_command() {
        assert_eq!(Platform::Windows.python_command(), "python");
        assert_eq!(Platform::Linux.python_command(), "python3");
    }
}
