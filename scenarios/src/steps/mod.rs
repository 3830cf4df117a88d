//! Human readable scenario steps and the calls they map to.

use {
  crate::ScenarioContext,
  std::fmt::Display,
  tokenbench_sdk::role_name,
};

mod account;
mod token;
mod topic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
  Given,
  When,
  Then,
}

impl Display for Keyword {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Keyword::Given => "Given",
      Keyword::When => "When",
      Keyword::Then => "Then",
    })
  }
}

/// Which key a new topic requires for submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicKey {
  /// The key of the account playing this role.
  Account(usize),
  /// The threshold key built by an earlier step.
  Threshold,
}

/// One scenario step. Accounts are referred to by role, where role `0`
/// is the first configured account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
  HederaAccount { hbars: i64 },
  AccountWithMoreThan { role: usize, hbars: i64 },
  Account { role: usize },
  AccountWithTokens { role: usize, hbars: i64, tokens: u64 },
  AccountWithHbars { role: usize, hbars: i64 },

  CreateToken,
  CreateFixedSupplyToken { supply: u64 },
  TokenWithSupply { supply: u64 },
  TokenHasName(String),
  TokenHasSymbol(String),
  TokenHasDecimals(u32),
  TokenOwnedByAccount,
  MintSucceeds(u64),
  MintFails,
  TotalSupply(u64),

  Holds { role: usize, tokens: u64 },
  ShouldHold { role: usize, tokens: u64 },
  CreateTransfer { from: usize, to: usize, tokens: u64 },
  CreateMultiTransfer { out: u64, into_third: u64, into_fourth: u64 },
  Submit { role: usize },
  PaidFee { role: usize },

  ThresholdKey { threshold: u32, total: usize },
  CreateTopic { memo: String, submit_key: TopicKey },
  Publish(String),
  PublishAs { role: usize, message: String },
  PublishRejected { role: usize, message: String },
  Received(String),
}

impl Step {
  pub fn keyword(&self) -> Keyword {
    match self {
      Step::HederaAccount { .. }
      | Step::AccountWithMoreThan { .. }
      | Step::Account { .. }
      | Step::AccountWithTokens { .. }
      | Step::AccountWithHbars { .. }
      | Step::TokenWithSupply { .. }
      | Step::Holds { .. }
      | Step::ThresholdKey { .. } => Keyword::Given,

      Step::CreateToken
      | Step::CreateFixedSupplyToken { .. }
      | Step::CreateTransfer { .. }
      | Step::CreateMultiTransfer { .. }
      | Step::Submit { .. }
      | Step::CreateTopic { .. }
      | Step::Publish(_)
      | Step::PublishAs { .. } => Keyword::When,

      Step::TokenHasName(_)
      | Step::TokenHasSymbol(_)
      | Step::TokenHasDecimals(_)
      | Step::TokenOwnedByAccount
      | Step::MintSucceeds(_)
      | Step::MintFails
      | Step::TotalSupply(_)
      | Step::ShouldHold { .. }
      | Step::PaidFee { .. }
      | Step::PublishRejected { .. }
      | Step::Received(_) => Keyword::Then,
    }
  }

  pub async fn run(&self, ctx: &mut ScenarioContext) -> anyhow::Result<()> {
    match self {
      Step::HederaAccount { hbars } => {
        account::has_more_than(ctx, 0, *hbars).await
      }
      Step::AccountWithMoreThan { role, hbars }
      | Step::AccountWithHbars { role, hbars } => {
        account::has_more_than(ctx, *role, *hbars).await
      }
      Step::Account { role } => account::exists(ctx, *role).await,
      Step::AccountWithTokens {
        role,
        hbars,
        tokens,
      } => {
        match role {
          0 => account::has_more_than(ctx, *role, *hbars).await?,
          _ => account::has_at_least(ctx, *role, *hbars).await?,
        }
        token::ensure_holds(ctx, *role, *tokens).await
      }

      Step::CreateToken => token::create(ctx, None).await,
      Step::CreateFixedSupplyToken { supply } => {
        token::create(ctx, Some(*supply)).await
      }
      Step::TokenWithSupply { supply } => {
        token::with_supply(ctx, *supply).await
      }
      Step::TokenHasName(name) => token::has_name(ctx, name).await,
      Step::TokenHasSymbol(symbol) => token::has_symbol(ctx, symbol).await,
      Step::TokenHasDecimals(decimals) => {
        token::has_decimals(ctx, *decimals).await
      }
      Step::TokenOwnedByAccount => token::owned_by_first(ctx).await,
      Step::MintSucceeds(amount) => token::mint_succeeds(ctx, *amount).await,
      Step::MintFails => token::mint_fails(ctx).await,
      Step::TotalSupply(supply) => token::total_supply(ctx, *supply).await,

      Step::Holds { role, tokens } => {
        token::ensure_holds(ctx, *role, *tokens).await
      }
      Step::ShouldHold { role, tokens } => {
        token::should_hold(ctx, *role, *tokens).await
      }
      Step::CreateTransfer { from, to, tokens } => {
        token::create_transfer(ctx, *from, *to, *tokens)
      }
      Step::CreateMultiTransfer {
        out,
        into_third,
        into_fourth,
      } => token::create_multi_transfer(ctx, *out, *into_third, *into_fourth),
      Step::Submit { role } => token::submit(ctx, *role).await,
      Step::PaidFee { role } => account::paid_fee(ctx, *role).await,

      Step::ThresholdKey { threshold, total } => {
        topic::threshold_key(ctx, *threshold, *total)
      }
      Step::CreateTopic { memo, submit_key } => {
        topic::create(ctx, memo, submit_key).await
      }
      Step::Publish(message) => topic::publish(ctx, 0, message).await,
      Step::PublishAs { role, message } => {
        topic::publish(ctx, *role, message).await
      }
      Step::PublishRejected { role, message } => {
        topic::publish_rejected(ctx, *role, message).await
      }
      Step::Received(message) => topic::received(ctx, message).await,
    }
  }
}

fn capitalized(role: usize) -> String {
  let name = role_name(role);
  let mut chars = name.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => name,
  }
}

impl Display for Step {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Step::HederaAccount { hbars } => {
        write!(f, "A Hedera account with more than {hbars} hbar")
      }
      Step::AccountWithMoreThan { role, hbars } => write!(
        f,
        "A {} hedera account with more than {hbars} hbar",
        role_name(*role)
      ),
      Step::Account { role } => {
        write!(f, "A {} Hedera account", role_name(*role))
      }
      Step::AccountWithTokens {
        role: 0,
        hbars,
        tokens,
      } => write!(
        f,
        "A first hedera account with more than {hbars} hbar and {tokens} \
         HTT tokens"
      ),
      Step::AccountWithTokens {
        role,
        hbars,
        tokens,
      } => write!(
        f,
        "A {} Hedera account with {hbars} hbar and {tokens} HTT tokens",
        role_name(*role)
      ),
      Step::AccountWithHbars { role, hbars } => write!(
        f,
        "A {} account with more than {hbars} hbars",
        role_name(*role)
      ),

      Step::CreateToken => write!(f, "I create a token named Test Token (HTT)"),
      Step::CreateFixedSupplyToken { supply } => write!(
        f,
        "I create a fixed supply token named Test Token (HTT) with {supply} \
         tokens"
      ),
      Step::TokenWithSupply { supply } => {
        write!(f, "A token named Test Token (HTT) with {supply} tokens")
      }
      Step::TokenHasName(name) => write!(f, "The token has the name \"{name}\""),
      Step::TokenHasSymbol(symbol) => {
        write!(f, "The token has the symbol \"{symbol}\"")
      }
      Step::TokenHasDecimals(decimals) => {
        write!(f, "The token has {decimals} decimals")
      }
      Step::TokenOwnedByAccount => write!(f, "The token is owned by the account"),
      Step::MintSucceeds(amount) => write!(
        f,
        "An attempt to mint {amount} additional tokens succeeds"
      ),
      Step::MintFails => write!(f, "An attempt to mint tokens fails"),
      Step::TotalSupply(supply) => {
        write!(f, "The total supply of the token is {supply}")
      }

      Step::Holds { role, tokens } | Step::ShouldHold { role, tokens } => {
        write!(f, "The {} account holds {tokens} HTT tokens", role_name(*role))
      }
      Step::CreateTransfer { from, to, tokens } => write!(
        f,
        "The {} account creates a transaction to transfer {tokens} HTT \
         tokens to the {} account",
        role_name(*from),
        role_name(*to)
      ),
      Step::CreateMultiTransfer {
        out,
        into_third,
        into_fourth,
      } => write!(
        f,
        "A transaction is created to transfer {out} HTT tokens out of the \
         first and second account and {into_third} HTT tokens into the \
         third account and {into_fourth} HTT tokens into the fourth account"
      ),
      Step::Submit { role } => {
        write!(f, "The {} account submits the transaction", role_name(*role))
      }
      Step::PaidFee { role } => write!(
        f,
        "The {} account has paid for the transaction fee",
        role_name(*role)
      ),

      Step::ThresholdKey { threshold, total } => write!(
        f,
        "A {threshold} of {total} threshold key with the first and second \
         account"
      ),
      Step::CreateTopic {
        memo,
        submit_key: TopicKey::Account(role),
      } => write!(
        f,
        "A topic is created with the memo \"{memo}\" with the {} account as \
         the submit key",
        role_name(*role)
      ),
      Step::CreateTopic {
        memo,
        submit_key: TopicKey::Threshold,
      } => write!(
        f,
        "A topic is created with the memo \"{memo}\" with the threshold key \
         as the submit key"
      ),
      Step::Publish(message) => {
        write!(f, "The message \"{message}\" is published to the topic")
      }
      Step::PublishAs { role, message } => write!(
        f,
        "The message \"{message}\" is published to the topic by the {} \
         account",
        role_name(*role)
      ),
      Step::PublishRejected { role, message } => write!(
        f,
        "{} account publishing the message \"{message}\" is rejected",
        capitalized(*role)
      ),
      Step::Received(message) => write!(
        f,
        "The message \"{message}\" is received by the topic and can be \
         printed to the console"
      ),
    }
  }
}
