//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{
        books::records::{BookRecord, BookUuid},
        members::records::MemberUuid,
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub customer_uuid: MemberUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub book_uuid: BookUuid,
    pub created_at: Timestamp,
}

/// A cart item together with the book it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item_uuid: CartItemUuid,
    pub seller_name: String,
    pub book: BookRecord,
}

/// The part of a cart sold by one seller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerCart {
    pub seller_uuid: MemberUuid,
    pub seller_name: String,
    pub lines: Vec<CartLine>,
    pub subtotal: u64,
}

impl SellerCart {
    /// An empty group for `seller`.
    #[must_use]
    pub fn empty(seller_uuid: MemberUuid) -> Self {
        Self {
            seller_uuid,
            seller_name: String::new(),
            lines: Vec::new(),
            subtotal: 0,
        }
    }

    fn push(&mut self, line: CartLine) {
        self.subtotal = self.subtotal.saturating_add(line.book.price);
        self.seller_name.clone_from(&line.seller_name);
        self.lines.push(line);
    }
}

/// Group cart lines by seller, keeping the order in which sellers first appear.
#[must_use]
pub fn group_by_seller(lines: Vec<CartLine>) -> Vec<SellerCart> {
    let mut groups: Vec<SellerCart> = Vec::new();

    for line in lines {
        let seller = line.book.seller_uuid;

        match groups.iter_mut().find(|group| group.seller_uuid == seller) {
            Some(group) => group.push(line),
            None => {
                let mut group = SellerCart::empty(seller);

                group.push(line);
                groups.push(group);
            }
        }
    }

    groups
}
