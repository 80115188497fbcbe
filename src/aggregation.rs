//! The pure filter/group/sum pipeline run over a fetched transaction set.
//!
//! Everything here is a function of (record slice, parameters): dashboard
//! views recompute the derived data in full on every input change, which is
//! fine at the expected set sizes. Totals are raw numbers; display
//! formatting is a presentation concern.

use std::{collections::HashMap, num::ParseIntError, str::FromStr};

use time::{Date, Month};

use crate::transaction::{Transaction, TransactionType};

/// A calendar month, e.g. `2024-01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    /// The calendar year.
    pub year: i32,
    /// The month within the year.
    pub month: Month,
}

impl YearMonth {
    /// Whether `date` falls inside this month.
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for YearMonth {
    type Err = String;

    /// Parse the `YYYY-MM` form used by month inputs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("\"{s}\" is not a YYYY-MM month"))?;

        let year: i32 = year
            .parse()
            .map_err(|error: ParseIntError| error.to_string())?;
        let month: u8 = month
            .parse()
            .map_err(|error: ParseIntError| error.to_string())?;
        let month = Month::try_from(month).map_err(|error| error.to_string())?;

        Ok(Self { year, month })
    }
}

/// The filter constraints a record must satisfy, combined with logical AND.
///
/// Absent constraints impose no restriction. All comparisons are on calendar
/// date only. A record with no parseable date fails any supplied date
/// constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Keep records dated within this month.
    pub month: Option<YearMonth>,
    /// Keep records dated on or after this date.
    pub from: Option<Date>,
    /// Keep records dated on or before this date.
    pub to: Option<Date>,
    /// Keep records whose category matches exactly.
    pub category: Option<String>,
}

impl TransactionFilter {
    fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(month) = &self.month
            && !transaction.date.is_some_and(|date| month.contains(date))
        {
            return false;
        }

        if let Some(from) = self.from
            && !transaction.date.is_some_and(|date| date >= from)
        {
            return false;
        }

        if let Some(to) = self.to
            && !transaction.date.is_some_and(|date| date <= to)
        {
            return false;
        }

        if let Some(category) = &self.category
            && transaction.category != *category
        {
            return false;
        }

        true
    }
}

/// Keep the transactions satisfying every supplied constraint, in their
/// original order.
pub fn filter_transactions(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .cloned()
        .collect()
}

/// The overall sums per transaction type.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TypeTotals {
    /// The sum of all income amounts.
    pub income: f64,
    /// The sum of all expense amounts.
    pub expense: f64,
}

/// Sum the amounts of a record set separately per type.
///
/// Records whose type label is not recognized count towards neither total.
pub fn totals_by_type(transactions: &[Transaction]) -> TypeTotals {
    let mut totals = TypeTotals::default();

    for transaction in transactions {
        match TransactionType::from_label(&transaction.transaction_type) {
            Some(TransactionType::Income) => totals.income += transaction.amount,
            Some(TransactionType::Expense) => totals.expense += transaction.amount,
            None => {}
        }
    }

    totals
}

/// An ordered income/expense split of a record set with its subtotals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Breakdown {
    /// The income records, in their original order.
    pub income: Vec<Transaction>,
    /// The expense records, in their original order.
    pub expense: Vec<Transaction>,
    /// The sum of the income records' amounts.
    pub income_total: f64,
    /// The sum of the expense records' amounts.
    pub expense_total: f64,
}

impl Breakdown {
    fn push(&mut self, transaction: &Transaction) {
        match TransactionType::from_label(&transaction.transaction_type) {
            Some(TransactionType::Income) => {
                self.income_total += transaction.amount;
                self.income.push(transaction.clone());
            }
            Some(TransactionType::Expense) => {
                self.expense_total += transaction.amount;
                self.expense.push(transaction.clone());
            }
            None => {}
        }
    }
}

/// Split a record set by type, with running totals equal to
/// [totals_by_type].
pub fn group_by_type(transactions: &[Transaction]) -> Breakdown {
    let mut breakdown = Breakdown::default();

    for transaction in transactions {
        breakdown.push(transaction);
    }

    breakdown
}

/// Group a record set by category, each bucket split by type with its own
/// subtotals.
///
/// Every record lands in exactly one category bucket.
pub fn group_by_category(transactions: &[Transaction]) -> HashMap<String, Breakdown> {
    let mut groups: HashMap<String, Breakdown> = HashMap::new();

    for transaction in transactions {
        groups
            .entry(transaction.category.clone())
            .or_default()
            .push(transaction);
    }

    groups
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use time::{Month, macros::date};

    use super::{
        TransactionFilter, YearMonth, filter_transactions, group_by_category, group_by_type,
        totals_by_type,
    };
    use crate::transaction::Transaction;

    fn create_test_transaction(
        amount: f64,
        date: time::Date,
        label: &str,
        category: &str,
    ) -> Transaction {
        Transaction {
            id: format!("{category}-{amount}"),
            name: "Transaksi".to_owned(),
            date: Some(date),
            amount,
            transaction_type: label.to_owned(),
            category: category.to_owned(),
            description: String::new(),
            project: String::new(),
        }
    }

    fn sample_set() -> Vec<Transaction> {
        vec![
            create_test_transaction(5_000_000.0, date!(2024 - 01 - 05), "Pemasukan", "General"),
            create_test_transaction(250_000.0, date!(2024 - 01 - 10), "Pengeluaran", "Home"),
            create_test_transaction(1_000_000.0, date!(2024 - 02 - 01), "Pemasukan", "OBR"),
            create_test_transaction(100_000.0, date!(2024 - 02 - 14), "Pengeluaran", "General"),
        ]
    }

    #[test]
    fn year_month_parses_the_month_input_form() {
        assert_eq!(YearMonth::from_str("2024-01").unwrap(), YearMonth {
            year: 2024,
            month: Month::January,
        });
        assert!(YearMonth::from_str("January 2024").is_err());
        assert!(YearMonth::from_str("2024-13").is_err());
    }

    #[test]
    fn month_filter_keeps_only_that_month() {
        let transactions = vec![
            create_test_transaction(5_000_000.0, date!(2024 - 01 - 05), "Pemasukan", "General"),
            create_test_transaction(250_000.0, date!(2024 - 02 - 01), "Pengeluaran", "Home"),
        ];
        let filter = TransactionFilter {
            month: Some(YearMonth::from_str("2024-01").unwrap()),
            ..TransactionFilter::default()
        };

        let filtered = filter_transactions(&transactions, &filter);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].date, Some(date!(2024 - 01 - 05)));
    }

    #[test]
    fn an_empty_filter_keeps_everything() {
        let transactions = sample_set();

        let filtered = filter_transactions(&transactions, &TransactionFilter::default());

        assert_eq!(filtered, transactions);
    }

    #[test]
    fn filtering_is_a_pure_narrowing() {
        let transactions = sample_set();
        let filter = TransactionFilter {
            from: Some(date!(2024 - 01 - 08)),
            to: Some(date!(2024 - 02 - 10)),
            ..TransactionFilter::default()
        };

        let filtered = filter_transactions(&transactions, &filter);

        assert!(filtered.len() < transactions.len());
        assert!(
            filtered
                .iter()
                .all(|transaction| transactions.contains(transaction))
        );
        assert_eq!(filtered[0].date, Some(date!(2024 - 01 - 10)));
        assert_eq!(filtered[1].date, Some(date!(2024 - 02 - 01)));
    }

    #[test]
    fn constraints_combine_with_logical_and() {
        let transactions = sample_set();
        let filter = TransactionFilter {
            month: Some(YearMonth::from_str("2024-02").unwrap()),
            category: Some("General".to_owned()),
            ..TransactionFilter::default()
        };

        let filtered = filter_transactions(&transactions, &filter);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].amount, 100_000.0);
    }

    #[test]
    fn records_without_a_date_fail_date_constraints_only() {
        let mut undated =
            create_test_transaction(50_000.0, date!(2024 - 01 - 01), "Pengeluaran", "Home");
        undated.date = None;
        let transactions = vec![undated];

        let date_filter = TransactionFilter {
            from: Some(date!(2024 - 01 - 01)),
            ..TransactionFilter::default()
        };
        assert!(filter_transactions(&transactions, &date_filter).is_empty());

        let category_filter = TransactionFilter {
            category: Some("Home".to_owned()),
            ..TransactionFilter::default()
        };
        assert_eq!(filter_transactions(&transactions, &category_filter).len(), 1);
    }

    #[test]
    fn totals_sum_each_type_separately() {
        let totals = totals_by_type(&sample_set());

        assert_eq!(totals.income, 6_000_000.0);
        assert_eq!(totals.expense, 350_000.0);
    }

    #[test]
    fn unrecognized_type_labels_count_towards_neither_total() {
        let mut transactions = sample_set();
        transactions.push(create_test_transaction(
            999.0,
            date!(2024 - 01 - 01),
            "Transfer",
            "General",
        ));

        let totals = totals_by_type(&transactions);

        assert_eq!(totals.income, 6_000_000.0);
        assert_eq!(totals.expense, 350_000.0);
    }

    #[test]
    fn type_groups_carry_the_type_wide_totals() {
        let transactions = sample_set();

        let breakdown = group_by_type(&transactions);
        let totals = totals_by_type(&transactions);

        assert_eq!(breakdown.income_total, totals.income);
        assert_eq!(breakdown.expense_total, totals.expense);
        assert_eq!(breakdown.income.len(), 2);
        assert_eq!(breakdown.expense.len(), 2);
        // Original order is preserved within each list.
        assert_eq!(breakdown.income[0].date, Some(date!(2024 - 01 - 05)));
        assert_eq!(breakdown.income[1].date, Some(date!(2024 - 02 - 01)));
    }

    #[test]
    fn category_groups_partition_the_record_set() {
        let transactions = sample_set();

        let groups = group_by_category(&transactions);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups["General"].income_total, 5_000_000.0);
        assert_eq!(groups["General"].expense_total, 100_000.0);
        assert_eq!(groups["Home"].expense_total, 250_000.0);
        assert_eq!(groups["OBR"].income_total, 1_000_000.0);

        // The per-category subtotals sum back to the overall totals.
        let totals = totals_by_type(&transactions);
        let income_sum: f64 = groups.values().map(|group| group.income_total).sum();
        let expense_sum: f64 = groups.values().map(|group| group.expense_total).sum();
        assert_eq!(income_sum, totals.income);
        assert_eq!(expense_sum, totals.expense);

        let record_count: usize = groups
            .values()
            .map(|group| group.income.len() + group.expense.len())
            .sum();
        assert_eq!(record_count, transactions.len());
    }

    #[test]
    fn category_subtotals_match_a_manual_restriction() {
        let transactions = sample_set();

        let groups = group_by_category(&transactions);

        let manual: f64 = transactions
            .iter()
            .filter(|transaction| {
                transaction.category == "General" && transaction.transaction_type == "Pemasukan"
            })
            .map(|transaction| transaction.amount)
            .sum();
        assert_eq!(groups["General"].income_total, manual);
    }
}
