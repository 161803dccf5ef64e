#[derive(Debug, gumdrop::Options)]
pub struct Args {
    /// prints the help message
    pub help: bool,

    /// the server to connect to
    #[options(required, meta = "<HOST>")]
    pub server: String,

    /// port to connect to (default: 6667)
    #[options(meta = "<PORT>", default = "6667")]
    pub port: u16,

    /// the configuration file to use (default: config/summer.yml)
    #[options(meta = "<PATH>", default = "config/summer.yml")]
    pub config: String,

    /// connect and register, but don't read anything from the server
    pub dry_run: bool,
}

impl Args {
    pub fn address(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }
}
