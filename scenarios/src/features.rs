use crate::steps::{Step, TopicKey};

pub struct Scenario {
  pub name: &'static str,
  pub steps: Vec<Step>,
}

pub struct Feature {
  pub name: &'static str,
  pub scenarios: Vec<Scenario>,
}

pub fn features() -> Vec<Feature> {
  vec![token_service(), topic_service()]
}

fn token_service() -> Feature {
  use Step::*;

  Feature {
    name: "Token service",
    scenarios: vec![
      Scenario {
        name: "Create a mintable token",
        steps: vec![
          HederaAccount { hbars: 10 },
          CreateToken,
          TokenHasName("Test Token".into()),
          TokenHasSymbol("HTT".into()),
          TokenHasDecimals(2),
          TokenOwnedByAccount,
          MintSucceeds(100),
        ],
      },
      Scenario {
        name: "Create a fixed supply token",
        steps: vec![
          HederaAccount { hbars: 10 },
          CreateFixedSupplyToken { supply: 1000 },
          TotalSupply(1000),
          MintFails,
        ],
      },
      Scenario {
        name: "Transfer tokens between 2 accounts",
        steps: vec![
          AccountWithMoreThan { role: 0, hbars: 10 },
          Account { role: 1 },
          TokenWithSupply { supply: 1000 },
          Holds { role: 0, tokens: 100 },
          Holds { role: 1, tokens: 0 },
          CreateTransfer {
            from: 0,
            to: 1,
            tokens: 10,
          },
          Submit { role: 0 },
          ShouldHold { role: 1, tokens: 10 },
          ShouldHold { role: 0, tokens: 90 },
        ],
      },
      Scenario {
        name: "Transfer tokens with the receiver paying the fee",
        steps: vec![
          AccountWithMoreThan { role: 0, hbars: 10 },
          Account { role: 1 },
          TokenWithSupply { supply: 1000 },
          Holds { role: 0, tokens: 100 },
          Holds { role: 1, tokens: 100 },
          CreateTransfer {
            from: 1,
            to: 0,
            tokens: 10,
          },
          Submit { role: 0 },
          PaidFee { role: 0 },
          ShouldHold { role: 0, tokens: 110 },
          ShouldHold { role: 1, tokens: 90 },
        ],
      },
      Scenario {
        name: "Transfer with multiple inputs and outputs",
        steps: vec![
          TokenWithSupply { supply: 1000 },
          AccountWithTokens {
            role: 0,
            hbars: 10,
            tokens: 100,
          },
          AccountWithTokens {
            role: 1,
            hbars: 0,
            tokens: 100,
          },
          AccountWithTokens {
            role: 2,
            hbars: 0,
            tokens: 100,
          },
          AccountWithTokens {
            role: 3,
            hbars: 0,
            tokens: 100,
          },
          CreateMultiTransfer {
            out: 10,
            into_third: 15,
            into_fourth: 5,
          },
          Submit { role: 0 },
          ShouldHold { role: 0, tokens: 90 },
          ShouldHold { role: 1, tokens: 90 },
          ShouldHold { role: 2, tokens: 115 },
          ShouldHold { role: 3, tokens: 105 },
        ],
      },
    ],
  }
}

fn topic_service() -> Feature {
  use Step::*;

  Feature {
    name: "Topic service",
    scenarios: vec![
      Scenario {
        name: "Publish a message to a topic",
        steps: vec![
          AccountWithHbars { role: 0, hbars: 10 },
          CreateTopic {
            memo: "Taxi rides".into(),
            submit_key: TopicKey::Account(0),
          },
          Publish("Main Street".into()),
          Received("Main Street".into()),
        ],
      },
      Scenario {
        name: "Reject a message from outside the submit key",
        steps: vec![
          AccountWithHbars { role: 0, hbars: 10 },
          AccountWithHbars { role: 1, hbars: 10 },
          CreateTopic {
            memo: "Taxi rides".into(),
            submit_key: TopicKey::Account(0),
          },
          PublishRejected {
            role: 1,
            message: "Side Street".into(),
          },
        ],
      },
      Scenario {
        name: "Publish a message with a 1 of 2 threshold key",
        steps: vec![
          AccountWithHbars { role: 0, hbars: 10 },
          AccountWithHbars { role: 1, hbars: 10 },
          ThresholdKey {
            threshold: 1,
            total: 2,
          },
          CreateTopic {
            memo: "Taxi rides".into(),
            submit_key: TopicKey::Threshold,
          },
          Publish("Main Street".into()),
          Received("Main Street".into()),
          PublishAs {
            role: 1,
            message: "Broadway".into(),
          },
          Received("Broadway".into()),
        ],
      },
    ],
  }
}
