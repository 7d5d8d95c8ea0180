#[macro_export]
macro_rules! env_lazy {
    ($( $vis:vis $name:ident : $ty:ty = ($key:literal, $default:expr); )* ) => {
        $(
            $vis static $name: ::std::sync::LazyLock<$ty> = ::std::sync::LazyLock::new(|| {
                $crate::libs::config::load_env();
                $crate::libs::config::Config::get_var_t::<$ty>($key, $default)
            });
        )*
    };
}

env_lazy! {
    pub MIN_TERMINAL_HEIGHT: u16 = ("MIN_TERMINAL_HEIGHT", 24);
    pub ACCOUNT_POLL_MS: u64     = ("ACCOUNT_POLL_MS", 1500);
}

/// Frame's local signer endpoint.
pub const DEFAULT_WALLET_RPC: &str = "http://127.0.0.1:1248";

/// Dummy ERC20 (DERC20) from the Polygon faucet.
pub const DEFAULT_TOKEN: &str = "0xfe4F5145f6e09952a5ba9e956ED0C25e3Fa4c7F1";

pub const DEFAULT_RECIPIENT: &str = "0x2254E4D1B41F2Dd3969a79b994E6ee8C3C6F2C71";

/// Phases kept in the machine's transition history.
pub const PHASE_HISTORY: usize = 64;
