use ethers::prelude::*;

abigen!(
    Erc20,
    r#"[
        {
            "name": "balanceOf",
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
