use ethers::prelude::*;

// Bond depository ledger. A bond slot whose `owner` is the zero address is
// vacant (redeemed or never issued); only occupied slots carry a payout.
abigen!(
    IBondLedger,
    r#"[
        {
            "name": "bondCount",
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
            "name": "bondInfo",
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
                    "name": "payout"
                },
                {
                    "type": "uint256",
                    "name": "vesting"
                },
                {
                    "type": "uint256",
                    "name": "lastTimestamp"
                },
                {
                    "type": "address",
                    "name": "owner"
                }
            ],
            "stateMutability": "view",
            "type": "function"
        }
    ]"#
);
