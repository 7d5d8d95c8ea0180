use alloy::primitives::address;

use crate::network::{NetworkParams, Variant};

/// Bridge contract listed per entry: PolygonZkEVMBridge, deployed at the
/// same address on both layers.
pub const NETWORKS: &[NetworkParams] = &[
    NetworkParams {
        variant: Variant::ZkEvm,
        name: "testnet",
        version: "blueberry",
        parent_chain_id: 5,
        child_chain_id: 1442,
        parent_label: "Goerli",
        child_label: "zkEVM testnet",
        bridge_contracts: &[
            address!("f6beeebb578e214ca9e23b0e9683454ff88ed2a7"),
        ],
    },
    NetworkParams {
        variant: Variant::ZkEvm,
        name: "testnet",
        version: "cardona",
        parent_chain_id: 11155111,
        child_chain_id: 2442,
        parent_label: "Sepolia",
        child_label: "zkEVM Cardona",
        bridge_contracts: &[
            address!("528e26b25a34a4a5d0dbda1d57d318153d2ed582"),
        ],
    },
    NetworkParams {
        variant: Variant::ZkEvm,
        name: "mainnet",
        version: "cherry",
        parent_chain_id: 1,
        child_chain_id: 1101,
        parent_label: "Ethereum",
        child_label: "Polygon zkEVM",
        bridge_contracts: &[
            address!("2a3dd3eb832af982ec71669e178424b10dca2ede"),
        ],
    },
];
