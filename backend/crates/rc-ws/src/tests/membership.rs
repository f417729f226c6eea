//! Unit tests for per-connection room membership.

use crate::RoomMembership;
use crate::tests::user;

#[test]
fn given_fresh_membership_when_joined_then_member() {
    let mut membership = RoomMembership::new();

    assert!(membership.join("p1", user(1)));
    assert!(membership.is_member("p1"));
    assert!(!membership.is_member("p2"));
}

#[test]
fn given_existing_membership_when_rejoined_then_no_change() {
    let mut membership = RoomMembership::new();
    membership.join("p1", user(1));

    assert!(!membership.join("p1", user(1)));
    assert_eq!(membership.projects().count(), 1);
}

#[test]
fn given_two_rooms_when_left_then_all_cleared() {
    let mut membership = RoomMembership::new();
    membership.join("p1", user(1));
    membership.join("p2", user(1));

    let mut left = membership.leave_all();
    left.sort();

    assert_eq!(left, vec!["p1".to_string(), "p2".to_string()]);
    assert!(membership.is_empty());
}

#[test]
fn given_no_rooms_when_left_then_empty() {
    let mut membership = RoomMembership::new();

    assert!(membership.leave_all().is_empty());
}

#[test]
fn given_two_joins_when_user_read_then_first_identity_sticks() {
    let mut membership = RoomMembership::new();
    membership.join("p1", user(1));
    membership.join("p2", user(2));

    assert_eq!(membership.user().map(|u| u.id), Some(1));
}
