use super::Ticket;

/// One batch of tickets returned by a ticket source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketPage {
    pub page_number: u32,
    pub items: Vec<Ticket>,
    /// Records the backend sent, including any rejected at the boundary.
    pub received: usize,
}

impl TicketPage {
    pub fn new(page_number: u32, items: Vec<Ticket>) -> Self {
        let received = items.len();
        Self {
            page_number,
            items,
            received,
        }
    }

    /// Overrides the received count when some records were dropped.
    pub fn with_received(mut self, received: usize) -> Self {
        self.received = received;
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// An empty or short page is the last one.
    ///
    /// Judged on what the backend sent, so dropped records never end
    /// pagination early.
    pub fn is_last(&self, page_size: usize) -> bool {
        self.received == 0 || self.received < page_size
    }
}
