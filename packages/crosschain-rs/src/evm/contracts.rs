//! Mirror contract ABI definitions
//!
//! Uses alloy's sol! macro to generate type-safe bindings for the mirrored
//! token contract. The contract itself is an external artifact; only the
//! entry points the demo touches are declared here.

use alloy::sol;

sol! {
    /// ERC20 twin of the XRPL MPToken issuance.
    ///
    /// `mint` is restricted to the minter role (the deployer in this demo)
    /// and stands in for value arriving over a bridge.
    #[sol(rpc)]
    contract BridgedMPToken {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);

        /// Privileged mint entry point (minter role only).
        function mint(address to, uint256 amount) external;

        event Transfer(address indexed from, address indexed to, uint256 value);
    }
}
