//! Proof-of-stake bridge: Ethereum roots with Polygon PoS children.

pub mod networks;
