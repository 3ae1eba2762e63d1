use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderdesk_core::{
    Aggregate, AggregateRoot, CustomerId, DomainError, Money, OrderId, Upc,
};

/// Draft order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Building,
    Committed,
    Aborted,
}

/// One confirmed product+quantity entry within a draft order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub line_no: u32,
    pub upc: Upc,
    /// Product name at the time of addition, kept for receipts.
    pub product_name: String,
    pub quantity: u32,
    /// Unit list price at the time of addition.
    pub unit_price: Money,
    /// `quantity × unit_price`, fixed at addition time.
    pub subtotal: Money,
}

/// Aggregate root: an order under construction during one session.
///
/// Lines are append-only; the running total always equals the sum of the
/// line subtotals. The aggregate never reads the catalog itself — the stock
/// snapshot it validates against travels inside [`AddLine`], so state flows
/// through the transition explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftOrder {
    id: OrderId,
    customer_id: Option<CustomerId>,
    clerk: String,
    opened_at: Option<DateTime<Utc>>,
    status: OrderStatus,
    lines: Vec<LineItem>,
    total: Money,
    version: u64,
    opened: bool,
}

impl DraftOrder {
    /// Create an empty, not-yet-opened instance.
    pub fn empty(id: OrderId) -> Self {
        Self {
            id,
            customer_id: None,
            clerk: String::new(),
            opened_at: None,
            status: OrderStatus::Building,
            lines: Vec::new(),
            total: Money::ZERO,
            version: 0,
            opened: false,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customer_id
    }

    pub fn clerk(&self) -> &str {
        &self.clerk
    }

    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        self.opened_at
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn is_building(&self) -> bool {
        matches!(self.status, OrderStatus::Building)
    }
}

impl AggregateRoot for DraftOrder {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: OpenOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOrder {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    /// Salesperson identity recorded on the order.
    pub clerk: String,
    pub opened_at: DateTime<Utc>,
}

/// Command: AddLine.
///
/// Carries a snapshot of the product at decision time: name and unit price
/// for the receipt, `available_stock` for the quantity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLine {
    pub order_id: OrderId,
    pub upc: Upc,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub available_stock: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CommitOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitOrder {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AbortOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbortOrder {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderCommand {
    OpenOrder(OpenOrder),
    AddLine(AddLine),
    CommitOrder(CommitOrder),
    AbortOrder(AbortOrder),
}

/// Event: OrderOpened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderOpened {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub clerk: String,
    pub opened_at: DateTime<Utc>,
}

/// Event: LineAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAdded {
    pub order_id: OrderId,
    pub line_no: u32,
    pub upc: Upc,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub subtotal: Money,
    /// Order total after this line, so `apply` stays infallible.
    pub running_total: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderCommitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCommitted {
    pub order_id: OrderId,
    pub total: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderAborted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAborted {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    OrderOpened(OrderOpened),
    LineAdded(LineAdded),
    OrderCommitted(OrderCommitted),
    OrderAborted(OrderAborted),
}

impl Aggregate for DraftOrder {
    type Command = OrderCommand;
    type Event = OrderEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            OrderEvent::OrderOpened(e) => {
                self.id = e.order_id;
                self.customer_id = Some(e.customer_id);
                self.clerk = e.clerk.clone();
                self.opened_at = Some(e.opened_at);
                self.status = OrderStatus::Building;
                self.lines.clear();
                self.total = Money::ZERO;
                self.opened = true;
            }
            OrderEvent::LineAdded(e) => {
                self.lines.push(LineItem {
                    line_no: e.line_no,
                    upc: e.upc.clone(),
                    product_name: e.product_name.clone(),
                    quantity: e.quantity,
                    unit_price: e.unit_price,
                    subtotal: e.subtotal,
                });
                self.total = e.running_total;
            }
            OrderEvent::OrderCommitted(_) => {
                self.status = OrderStatus::Committed;
            }
            OrderEvent::OrderAborted(_) => {
                self.status = OrderStatus::Aborted;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            OrderCommand::OpenOrder(cmd) => self.handle_open(cmd),
            OrderCommand::AddLine(cmd) => self.handle_add_line(cmd),
            OrderCommand::CommitOrder(cmd) => self.handle_commit(cmd),
            OrderCommand::AbortOrder(cmd) => self.handle_abort(cmd),
        }
    }
}

impl DraftOrder {
    fn ensure_order_id(&self, order_id: OrderId) -> Result<(), DomainError> {
        if self.id != order_id {
            return Err(DomainError::invariant("order_id mismatch"));
        }
        Ok(())
    }

    fn ensure_open_and_building(&self, order_id: OrderId) -> Result<(), DomainError> {
        if !self.opened {
            return Err(DomainError::invariant("order has not been opened"));
        }
        self.ensure_order_id(order_id)?;
        if !self.is_building() {
            return Err(DomainError::invariant(
                "order is already finalized (committed or aborted)",
            ));
        }
        Ok(())
    }

    fn handle_open(&self, cmd: &OpenOrder) -> Result<Vec<OrderEvent>, DomainError> {
        if self.opened {
            return Err(DomainError::invariant("order already opened"));
        }
        if cmd.clerk.trim().is_empty() {
            return Err(DomainError::validation("clerk identity must not be empty"));
        }

        Ok(vec![OrderEvent::OrderOpened(OrderOpened {
            order_id: cmd.order_id,
            customer_id: cmd.customer_id,
            clerk: cmd.clerk.clone(),
            opened_at: cmd.opened_at,
        })])
    }

    fn handle_add_line(&self, cmd: &AddLine) -> Result<Vec<OrderEvent>, DomainError> {
        self.ensure_open_and_building(cmd.order_id)?;

        if cmd.quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        if cmd.quantity > cmd.available_stock {
            return Err(DomainError::OutOfStock {
                name: cmd.product_name.clone(),
                requested: cmd.quantity,
                available: cmd.available_stock,
            });
        }

        let subtotal = cmd.unit_price.times(cmd.quantity)?;
        let running_total = self.total.plus(subtotal)?;
        let next_line_no = (self.lines.len() as u32) + 1;

        Ok(vec![OrderEvent::LineAdded(LineAdded {
            order_id: cmd.order_id,
            line_no: next_line_no,
            upc: cmd.upc.clone(),
            product_name: cmd.product_name.clone(),
            quantity: cmd.quantity,
            unit_price: cmd.unit_price,
            subtotal,
            running_total,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_commit(&self, cmd: &CommitOrder) -> Result<Vec<OrderEvent>, DomainError> {
        // A draft whose every line was declined may still commit; the
        // persisted order simply has no lines.
        self.ensure_open_and_building(cmd.order_id)?;

        Ok(vec![OrderEvent::OrderCommitted(OrderCommitted {
            order_id: cmd.order_id,
            total: self.total,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_abort(&self, cmd: &AbortOrder) -> Result<Vec<OrderEvent>, DomainError> {
        self.ensure_open_and_building(cmd.order_id)?;

        Ok(vec![OrderEvent::OrderAborted(OrderAborted {
            order_id: cmd.order_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use rust_decimal::Decimal;

    fn test_order_id() -> OrderId {
        OrderId::new()
    }

    fn test_customer_id() -> CustomerId {
        CustomerId::new(1)
    }

    fn test_time() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn money(s: &str) -> Money {
        Money::new(Decimal::from_str(s).unwrap()).unwrap()
    }

    fn opened_order(order_id: OrderId) -> DraftOrder {
        let mut order = DraftOrder::empty(order_id);
        let cmd = OpenOrder {
            order_id,
            customer_id: test_customer_id(),
            clerk: "clerk-1".to_string(),
            opened_at: test_time(),
        };
        let events = order.handle(&OrderCommand::OpenOrder(cmd)).unwrap();
        order.apply(&events[0]);
        order
    }

    fn hammer_line(order_id: OrderId, quantity: u32) -> AddLine {
        AddLine {
            order_id,
            upc: Upc::new("123"),
            product_name: "16 oz. hickory hammer".to_string(),
            quantity,
            unit_price: money("9.97"),
            available_stock: 50,
            occurred_at: test_time(),
        }
    }

    #[test]
    fn open_order_emits_order_opened_event() {
        let order_id = test_order_id();
        let order = DraftOrder::empty(order_id);
        let cmd = OpenOrder {
            order_id,
            customer_id: test_customer_id(),
            clerk: "clerk-1".to_string(),
            opened_at: test_time(),
        };

        let events = order.handle(&OrderCommand::OpenOrder(cmd)).unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            OrderEvent::OrderOpened(e) => {
                assert_eq!(e.order_id, order_id);
                assert_eq!(e.customer_id, test_customer_id());
                assert_eq!(e.clerk, "clerk-1");
            }
            _ => panic!("Expected OrderOpened event"),
        }
    }

    #[test]
    fn add_line_prices_the_line_and_numbers_it() {
        let order_id = test_order_id();
        let mut order = opened_order(order_id);

        let events = order
            .handle(&OrderCommand::AddLine(hammer_line(order_id, 2)))
            .unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            OrderEvent::LineAdded(e) => {
                assert_eq!(e.line_no, 1);
                assert_eq!(e.quantity, 2);
                assert_eq!(e.subtotal, money("19.94"));
                assert_eq!(e.running_total, money("19.94"));
            }
            _ => panic!("Expected LineAdded event"),
        }

        order.apply(&events[0]);
        assert_eq!(order.lines().len(), 1);
        assert_eq!(order.total(), money("19.94"));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let order_id = test_order_id();
        let order = opened_order(order_id);

        let err = order
            .handle(&OrderCommand::AddLine(hammer_line(order_id, 0)))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn quantity_beyond_stock_snapshot_is_rejected_naming_the_product() {
        let order_id = test_order_id();
        let order = opened_order(order_id);

        let err = order
            .handle(&OrderCommand::AddLine(hammer_line(order_id, 60)))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::OutOfStock {
                name: "16 oz. hickory hammer".to_string(),
                requested: 60,
                available: 50,
            }
        );
    }

    #[test]
    fn rejected_add_leaves_state_untouched() {
        let order_id = test_order_id();
        let order = opened_order(order_id);
        let before = order.clone();

        let _ = order
            .handle(&OrderCommand::AddLine(hammer_line(order_id, 60)))
            .unwrap_err();
        assert_eq!(order, before);
    }

    #[test]
    fn cannot_add_line_once_committed() {
        let order_id = test_order_id();
        let mut order = opened_order(order_id);

        let events = order
            .handle(&OrderCommand::CommitOrder(CommitOrder {
                order_id,
                occurred_at: test_time(),
            }))
            .unwrap();
        order.apply(&events[0]);
        assert_eq!(order.status(), OrderStatus::Committed);

        let err = order
            .handle(&OrderCommand::AddLine(hammer_line(order_id, 1)))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn cannot_commit_after_abort() {
        let order_id = test_order_id();
        let mut order = opened_order(order_id);

        let events = order
            .handle(&OrderCommand::AbortOrder(AbortOrder {
                order_id,
                occurred_at: test_time(),
            }))
            .unwrap();
        order.apply(&events[0]);
        assert_eq!(order.status(), OrderStatus::Aborted);

        let err = order
            .handle(&OrderCommand::CommitOrder(CommitOrder {
                order_id,
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn empty_draft_may_commit() {
        let order_id = test_order_id();
        let mut order = opened_order(order_id);

        let events = order
            .handle(&OrderCommand::CommitOrder(CommitOrder {
                order_id,
                occurred_at: test_time(),
            }))
            .unwrap();
        match &events[0] {
            OrderEvent::OrderCommitted(e) => assert_eq!(e.total, Money::ZERO),
            _ => panic!("Expected OrderCommitted event"),
        }
        order.apply(&events[0]);
        assert_eq!(order.status(), OrderStatus::Committed);
        assert!(order.lines().is_empty());
    }

    #[test]
    fn total_accumulates_across_lines() {
        let order_id = test_order_id();
        let mut order = opened_order(order_id);

        let events = order
            .handle(&OrderCommand::AddLine(hammer_line(order_id, 2)))
            .unwrap();
        order.apply(&events[0]);

        let second = AddLine {
            upc: Upc::new("124"),
            product_name: "19 oz. smooth face fiberglass".to_string(),
            unit_price: money("25.88"),
            available_stock: 10,
            ..hammer_line(order_id, 1)
        };
        let events = order.handle(&OrderCommand::AddLine(second)).unwrap();
        order.apply(&events[0]);

        assert_eq!(order.lines().len(), 2);
        assert_eq!(order.lines()[1].line_no, 2);
        assert_eq!(order.total(), money("45.82"));
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let order_id = test_order_id();
        let order = opened_order(order_id);
        let before = order.clone();

        let events1 = order
            .handle(&OrderCommand::AddLine(hammer_line(order_id, 2)))
            .unwrap();
        let events2 = order
            .handle(&OrderCommand::AddLine(hammer_line(order_id, 2)))
            .unwrap();

        assert_eq!(order, before);
        assert_eq!(events1, events2);
    }

    #[test]
    fn apply_is_deterministic() {
        let order_id = test_order_id();
        let opened = OrderEvent::OrderOpened(OrderOpened {
            order_id,
            customer_id: test_customer_id(),
            clerk: "clerk-1".to_string(),
            opened_at: test_time(),
        });
        let line = OrderEvent::LineAdded(LineAdded {
            order_id,
            line_no: 1,
            upc: Upc::new("123"),
            product_name: "16 oz. hickory hammer".to_string(),
            quantity: 2,
            unit_price: money("9.97"),
            subtotal: money("19.94"),
            running_total: money("19.94"),
            occurred_at: test_time(),
        });
        let committed = OrderEvent::OrderCommitted(OrderCommitted {
            order_id,
            total: money("19.94"),
            occurred_at: test_time(),
        });

        let mut order1 = DraftOrder::empty(order_id);
        let mut order2 = DraftOrder::empty(order_id);
        for event in [&opened, &line, &committed] {
            order1.apply(event);
            order2.apply(event);
        }

        assert_eq!(order1, order2);
        assert_eq!(order1.version(), 3);
        assert_eq!(order1.status(), OrderStatus::Committed);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: after any sequence of accepted additions, the
            /// running total equals the sum of the line subtotals.
            #[test]
            fn total_equals_sum_of_subtotals(
                lines in proptest::collection::vec((1u32..100, 1u64..10_000), 1..20)
            ) {
                let order_id = OrderId::new();
                let mut order = opened_order(order_id);

                for (i, (quantity, cents)) in lines.iter().enumerate() {
                    let cmd = AddLine {
                        order_id,
                        upc: Upc::new(format!("upc-{i}")),
                        product_name: format!("product {i}"),
                        quantity: *quantity,
                        unit_price: Money::new(Decimal::new(*cents as i64, 2)).unwrap(),
                        available_stock: *quantity,
                        occurred_at: Utc::now(),
                    };
                    let events = order.handle(&OrderCommand::AddLine(cmd)).unwrap();
                    order.apply(&events[0]);
                }

                let mut expected = Money::ZERO;
                for line in order.lines() {
                    prop_assert_eq!(line.subtotal, line.unit_price.times(line.quantity).unwrap());
                    expected = expected.plus(line.subtotal).unwrap();
                }
                prop_assert_eq!(order.total(), expected);
                prop_assert_eq!(order.lines().len(), lines.len());
            }

            /// Property: an addition whose quantity exceeds the stock
            /// snapshot is never accepted, whatever the numbers are.
            #[test]
            fn overdraw_is_never_accepted(
                available in 0u32..1000,
                excess in 1u32..1000,
            ) {
                let order_id = OrderId::new();
                let order = opened_order(order_id);
                let cmd = AddLine {
                    order_id,
                    upc: Upc::new("123"),
                    product_name: "hammer".to_string(),
                    quantity: available + excess,
                    unit_price: Money::new(Decimal::new(997, 2)).unwrap(),
                    available_stock: available,
                    occurred_at: Utc::now(),
                };
                let err = order.handle(&OrderCommand::AddLine(cmd)).unwrap_err();
                prop_assert!(matches!(err, DomainError::OutOfStock { .. }), "expected OutOfStock");
            }
        }
    }
}
