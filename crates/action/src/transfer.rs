use crate::{parse_amount, Action, Unready};
use alloy_primitives::Address;
use config::TokenDescriptor;
use ledger::WriteCall;
use token::ActionKind;

/// Move tokens from the connected account to a target using its allowance.
///
/// Balance and allowance sufficiency are not checked here; callers gate on
/// the session's insufficiency flags.
#[derive(Debug, Clone)]
pub struct TransferAction {
    decimals: u8,
    symbol: String,
    account: Option<Address>,
    target: String,
    amount: String,
}

impl TransferAction {
    pub fn new(
        token: &TokenDescriptor,
        account: Option<Address>,
        target: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            decimals: token.decimals,
            symbol: token.symbol.clone(),
            account,
            target: target.into(),
            amount: amount.into(),
        }
    }
}

impl Action for TransferAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Transfer
    }

    fn prepare(&self) -> Result<WriteCall, Unready> {
        let target = self.target.trim();
        if target.is_empty() {
            return Err(Unready::NoTarget);
        }
        let value = parse_amount(&self.amount, self.decimals)?;
        let from = self.account.ok_or(Unready::NoAccount)?;
        let to: Address = target
            .parse()
            .map_err(|_| Unready::InvalidTarget(self.target.clone()))?;

        Ok(WriteCall::TransferFrom { from, to, value })
    }

    fn description(&self) -> String {
        format!("Transferring {} {} to {}", self.amount, self.symbol, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};

    const ACCOUNT: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const TARGET: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

    fn dai() -> TokenDescriptor {
        TokenDescriptor::new(address!("1D70D57ccD2798323232B2dD027B3aBcA5C00091"), 18, "DAI")
    }

    #[test]
    fn test_prepare() {
        let action = TransferAction::new(
            &dai(),
            Some(ACCOUNT),
            "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
            "2",
        );
        assert_eq!(
            action.prepare(),
            Ok(WriteCall::TransferFrom {
                from: ACCOUNT,
                to: TARGET,
                value: U256::from(2_000_000_000_000_000_000u128),
            })
        );
    }

    #[test]
    fn test_preconditions() {
        let target = TARGET.to_string();
        assert_eq!(
            TransferAction::new(&dai(), Some(ACCOUNT), "", "1").prepare(),
            Err(Unready::NoTarget)
        );
        assert_eq!(
            TransferAction::new(&dai(), Some(ACCOUNT), &target, "").prepare(),
            Err(Unready::EmptyAmount)
        );
        assert_eq!(
            TransferAction::new(&dai(), None, &target, "1").prepare(),
            Err(Unready::NoAccount)
        );
        assert_eq!(
            TransferAction::new(&dai(), Some(ACCOUNT), "0x1234", "1").prepare(),
            Err(Unready::InvalidTarget("0x1234".to_string()))
        );
    }
}
