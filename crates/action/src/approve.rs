use crate::{parse_amount, Action, Unready};
use alloy_primitives::Address;
use config::TokenDescriptor;
use ledger::WriteCall;
use token::ActionKind;

/// Approve the connected account to spend its own tokens.
#[derive(Debug, Clone)]
pub struct ApproveAction {
    decimals: u8,
    symbol: String,
    account: Option<Address>,
    amount: String,
}

impl ApproveAction {
    pub fn new(token: &TokenDescriptor, account: Option<Address>, amount: impl Into<String>) -> Self {
        Self {
            decimals: token.decimals,
            symbol: token.symbol.clone(),
            account,
            amount: amount.into(),
        }
    }
}

impl Action for ApproveAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Approve
    }

    fn prepare(&self) -> Result<WriteCall, Unready> {
        let account = self.account.ok_or(Unready::NoAccount)?;
        let value = parse_amount(&self.amount, self.decimals)?;

        // spender is the connected account itself
        Ok(WriteCall::Approve {
            spender: account,
            value,
        })
    }

    fn description(&self) -> String {
        format!("Approving {} {}", self.amount, self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};

    const ACCOUNT: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    fn usdc() -> TokenDescriptor {
        TokenDescriptor::new(address!("C891481A0AaC630F4D89744ccD2C7D2C4215FD47"), 6, "USDC")
    }

    #[test]
    fn test_prepare_scales_amount() {
        let action = ApproveAction::new(&usdc(), Some(ACCOUNT), "12.5");
        assert_eq!(
            action.prepare(),
            Ok(WriteCall::Approve {
                spender: ACCOUNT,
                value: U256::from(12_500_000),
            })
        );
    }

    #[test]
    fn test_preconditions() {
        assert_eq!(
            ApproveAction::new(&usdc(), None, "1").prepare(),
            Err(Unready::NoAccount)
        );
        assert_eq!(
            ApproveAction::new(&usdc(), Some(ACCOUNT), "").prepare(),
            Err(Unready::EmptyAmount)
        );
        assert!(matches!(
            ApproveAction::new(&usdc(), Some(ACCOUNT), "1.0000001").prepare(),
            Err(Unready::InvalidAmount(_))
        ));
        assert!(!ApproveAction::new(&usdc(), Some(ACCOUNT), "abc").is_ready());
    }
}
