use ethers::prelude::*;

// Airdrop energy staking store. Stakes are an on-chain dynamic array per
// owner: `stakeCount` gives the length, `stakeRecords` is the indexed read.
abigen!(
    IEnergyStake,
    r#"[
        {
            "name": "stakeCount",
            "inputs": [
                {
                    "type": "address",
                    "name": "owner"
                }
            ],
            "outputs": [
                {
                    "type": "uint256",
                    "name": ""
                }
            ],
            "stateMutability": "view",
            "type": "function"
        },
        {
            "name": "stakeRecords",
            "inputs": [
                {
                    "type": "address",
                    "name": "owner"
                },
                {
                    "type": "uint256",
                    "name": "index"
                }
            ],
            "outputs": [
                {
                    "type": "uint256",
                    "name": "principal"
                },
                {
                    "type": "uint256",
                    "name": "power"
                },
                {
                    "type": "uint256",
                    "name": "unlockTime"
                },
                {
                    "type": "bool",
                    "name": "exists"
                }
            ],
            "stateMutability": "view",
            "type": "function"
        }
    ]"#
);
