use alloy::primitives::address;

use crate::network::{NetworkParams, Variant};

/// Bridge contracts listed per entry: RootChainManager, ERC20PredicateProxy.
pub const NETWORKS: &[NetworkParams] = &[
    NetworkParams {
        variant: Variant::Pos,
        name: "testnet",
        version: "mumbai",
        parent_chain_id: 5,
        child_chain_id: 80001,
        parent_label: "Goerli",
        child_label: "Mumbai",
        bridge_contracts: &[
            address!("bbd7cbfa79faee899eaf900f13c9065bf03b1a74"),
            address!("dd6596f2029e6233deffaca316e6a95217d4dc34"),
        ],
    },
    NetworkParams {
        variant: Variant::Pos,
        name: "testnet",
        version: "amoy",
        parent_chain_id: 11155111,
        child_chain_id: 80002,
        parent_label: "Sepolia",
        child_label: "Amoy",
        bridge_contracts: &[
            address!("34f5a25b627f50bb3f5cab72807c4d4f405a9232"),
            address!("4258c75b752c812b7fa586bdeb259f2d4bd17f4f"),
        ],
    },
    NetworkParams {
        variant: Variant::Pos,
        name: "mainnet",
        version: "v1",
        parent_chain_id: 1,
        child_chain_id: 137,
        parent_label: "Ethereum",
        child_label: "Polygon PoS",
        bridge_contracts: &[
            address!("a0c68c638235ee32657e8f720a23cec1bfc77c77"),
            address!("40ec5b33f54e0e8a33a975908c5ba1c14e5bbbdf"),
        ],
    },
];
