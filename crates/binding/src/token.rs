//! ERC20 token contract bindings.
//!
//! The dashboard's test tokens are plain ERC20s with an open `mint`.

use alloy_sol_types::sol;

sol! {
    /// Standard ERC20 token interface
    #[sol(rpc)]
    interface IERC20 {
        /// Get token balance of an account
        function balanceOf(address account) external view returns (uint256);

        /// Get allowance granted by owner to spender
        function allowance(address owner, address spender) external view returns (uint256);

        /// Approve spender to spend tokens
        function approve(address spender, uint256 value) external returns (bool);

        /// Move tokens out of `from` using the caller's allowance
        function transferFrom(address from, address to, uint256 value) external returns (bool);
    }

    /// Faucet extension exposed by the test tokens
    #[sol(rpc)]
    interface IMintableERC20 {
        /// Credit `_value` smallest units to `_address`
        function mint(address _address, uint256 _value) external;
    }
}
