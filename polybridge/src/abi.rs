alloy::sol! {
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address owner) view returns (uint256);
        function transfer(address to, uint256 value) returns (bool);
    }
}
