//! zk-EVM bridge: Ethereum roots with Polygon zkEVM rollups.

pub mod networks;
