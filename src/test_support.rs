//! Shared fixtures for the unit tests: fabricated `aggregate3` and nested
//! query responses, and a small in-memory contract configuration.

use ethers::abi::{encode, Token};
use ethers::types::{Address, Bytes, U256};

use crate::settings::ContractSet;

/// ABI-encodes an `aggregate3` response from `(success, return_data)` pairs.
pub fn agg_response(entries: Vec<(bool, Vec<u8>)>) -> Bytes {
    let tokens: Vec<Token> = entries
        .into_iter()
        .map(|(success, data)| Token::Tuple(vec![Token::Bool(success), Token::Bytes(data)]))
        .collect();
    Bytes::from(encode(&[Token::Array(tokens)]))
}

/// One ABI word holding a `uint256`.
pub fn uint_word(v: u64) -> Vec<u8> {
    encode(&[Token::Uint(U256::from(v))])
}

/// A `(bool[] successes, bytes[] results)` staking-query response whose
/// second entry carries `total` with the given success flag.
pub fn nested_staking_response(second_succeeded: bool, total: u64) -> Bytes {
    Bytes::from(encode(&[
        Token::Array(vec![Token::Bool(true), Token::Bool(second_succeeded)]),
        Token::Array(vec![
            Token::Bytes(uint_word(0)),
            Token::Bytes(uint_word(total)),
        ]),
    ]))
}

/// A contract configuration with `n_energy` stake contracts and `n_bonds`
/// bond contracts, every address distinct.
pub fn contract_set(n_energy: u64, n_bonds: u64) -> ContractSet {
    ContractSet {
        multicall3: Address::from_low_u64_be(0xca11),
        lgns_token: Address::from_low_u64_be(0x01),
        slgns_token: Address::from_low_u64_be(0x02),
        turbine_token: Address::from_low_u64_be(0x03),
        reward_pool: Address::from_low_u64_be(0x04),
        staking_query: Address::from_low_u64_be(0x05),
        energy_stake_contracts: (0..n_energy)
            .map(|i| Address::from_low_u64_be(0x100 + i))
            .collect(),
        bond_contracts: (0..n_bonds)
            .map(|i| Address::from_low_u64_be(0x200 + i))
            .collect(),
    }
}
