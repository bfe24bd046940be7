/// Tests for snapshot assembly from the store.
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use pocketplan_core::errors::Result;
use pocketplan_core::snapshot::{
    SnapshotRepositoryTrait, SnapshotService, StoredDebt, StoredGoal, StoredTransaction,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct MockSnapshotRepository {
    transactions: Vec<StoredTransaction>,
    goals: Vec<StoredGoal>,
    debts: Vec<StoredDebt>,
    starting_balance: Decimal,
}

#[async_trait]
impl SnapshotRepositoryTrait for MockSnapshotRepository {
    async fn load_transactions(&self, _user_id: &str) -> Result<Vec<StoredTransaction>> {
        Ok(self.transactions.clone())
    }

    async fn load_goals(&self, _user_id: &str) -> Result<Vec<StoredGoal>> {
        Ok(self.goals.clone())
    }

    async fn load_debts(&self, _user_id: &str) -> Result<Vec<StoredDebt>> {
        Ok(self.debts.clone())
    }

    async fn get_starting_balance(&self, _user_id: &str) -> Result<Decimal> {
        Ok(self.starting_balance)
    }

    async fn get_currency(&self, _user_id: &str) -> Result<String> {
        Ok("USD".to_string())
    }
}

#[tokio::test]
async fn test_snapshot_is_assembled_and_ordered() {
    // Store rows arrive out of order; the snapshot must come back
    // sorted by date with decimals bridged into the f64 domain.
    let repo = Arc::new(MockSnapshotRepository {
        transactions: vec![
            StoredTransaction {
                date: date(2025, 3, 1),
                amount: dec!(-200),
                category: Some("rent".to_string()),
            },
            StoredTransaction {
                date: date(2025, 1, 1),
                amount: dec!(1500),
                category: Some("salary".to_string()),
            },
        ],
        goals: vec![StoredGoal {
            id: "g-1".to_string(),
            target_amount: dec!(2000),
            current_amount: dec!(500),
            deadline: None,
            is_completed: false,
        }],
        debts: vec![StoredDebt {
            id: "d-1".to_string(),
            remaining_amount: dec!(750),
            minimum_payment: dec!(50),
            due_date: Some(date(2025, 12, 1)),
        }],
        starting_balance: dec!(1000),
    });
    let service = SnapshotService::new(repo);

    let snapshot = service.build_snapshot("user-1").await.unwrap();

    assert_eq!(snapshot.transactions.len(), 2);
    assert_eq!(snapshot.transactions[0].date, date(2025, 1, 1), "oldest first");
    assert_eq!(snapshot.transactions[0].amount, 1500.0);
    assert_eq!(snapshot.total_income(), 1500.0);
    assert_eq!(snapshot.total_expenses(), 200.0);
    assert_eq!(snapshot.total_debt(), 750.0);
    assert_eq!(snapshot.starting_balance, 1000.0);
    assert_eq!(snapshot.goals[0].remaining_amount(), 1500.0);
    assert_eq!(snapshot.currency, "USD");
}
