use ethers::prelude::*;

abigen!(
    IRewardPool,
    r#"[
        {
            "name": "pendingRewardOf",
            "inputs": [
                {
                    "type": "address",
                    "name": "account"
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
        }
    ]"#
);
