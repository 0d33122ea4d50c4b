use chirp::models::models::Database;
use chirp::core::errors::StoreError;
use chirp::users::{authenticate, lookup_by_username, register};
use chirp::posts::{add_comment, create_post};
use chirp::follow::{count_followers, count_following, is_following, toggle_follow, toggle_like};
use chirp::feed::{assemble_feed, assemble_profile};

#[test]
fn register_rejects_duplicate_username() {
    let mut db = Database::default();

    let first = register(&mut db, "alice", "pw1", "").expect("first registration");
    assert_eq!(first.username, "alice");

    let second = register(&mut db, "alice", "other", "");
    assert_eq!(second.unwrap_err(), StoreError::DuplicateUsername);

    // Exactly one record with that username survives.
    let count = db.users.iter().filter(|u| u.username == "alice").count();
    assert_eq!(count, 1);
}

#[test]
fn register_stores_hash_not_password() {
    let mut db = Database::default();
    let user = register(&mut db, "alice", "pw1", "hi").unwrap();

    assert_ne!(user.password_hash, "pw1");
    assert!(!user.password_hash.contains("pw1"));
}

#[test]
fn username_match_is_case_sensitive() {
    let mut db = Database::default();
    register(&mut db, "alice", "pw1", "").unwrap();

    assert!(register(&mut db, "Alice", "pw2", "").is_ok());
    assert!(lookup_by_username(&db, "ALICE").is_none());
}

#[test]
fn authenticate_fails_identically_for_missing_user_and_wrong_password() {
    let mut db = Database::default();
    register(&mut db, "alice", "pw1", "").unwrap();

    let wrong_password = authenticate(&db, "alice", "wrong").unwrap_err();
    let missing_user = authenticate(&db, "nouser", "x").unwrap_err();

    assert_eq!(wrong_password, StoreError::InvalidCredentials);
    assert_eq!(missing_user, wrong_password);

    assert!(authenticate(&db, "alice", "pw1").is_ok());
}

#[test]
fn ids_are_unique_across_entity_kinds() {
    let mut db = Database::default();
    let alice = register(&mut db, "alice", "pw1", "").unwrap();
    let post = create_post(&mut db, alice.id, "hello");
    let comment = add_comment(&mut db, alice.id, post.id, "hi");

    assert_ne!(alice.id, post.id);
    assert_ne!(post.id, comment.id);
    assert_ne!(alice.id, comment.id);
}

#[test]
fn toggle_like_is_an_involution() {
    let mut db = Database::default();
    let alice = register(&mut db, "alice", "pw1", "").unwrap();
    let bob = register(&mut db, "bob", "pw2", "").unwrap();
    let post = create_post(&mut db, alice.id, "hello");

    assert!(toggle_like(&mut db, bob.id, post.id));
    assert_eq!(db.likes.len(), 1);

    assert!(!toggle_like(&mut db, bob.id, post.id));
    assert!(db.likes.is_empty());

    // And again from the empty state.
    assert!(toggle_like(&mut db, bob.id, post.id));
    assert_eq!(db.likes.len(), 1);
}

#[test]
fn self_follow_is_rejected_without_mutation() {
    let mut db = Database::default();
    let alice = register(&mut db, "alice", "pw1", "").unwrap();

    let err = toggle_follow(&mut db, alice.id, alice.id).unwrap_err();
    assert_eq!(err, StoreError::SelfFollow);
    assert!(db.follows.is_empty());

    // Repeated attempts never create the edge either.
    assert!(toggle_follow(&mut db, alice.id, alice.id).is_err());
    assert!(db.follows.is_empty());
}

#[test]
fn toggle_follow_alternates_edge_state() {
    let mut db = Database::default();
    let alice = register(&mut db, "alice", "pw1", "").unwrap();
    let bob = register(&mut db, "bob", "pw2", "").unwrap();

    assert!(toggle_follow(&mut db, alice.id, bob.id).unwrap());
    assert!(is_following(&db, alice.id, bob.id));
    // Direction matters.
    assert!(!is_following(&db, bob.id, alice.id));

    assert!(!toggle_follow(&mut db, alice.id, bob.id).unwrap());
    assert!(!is_following(&db, alice.id, bob.id));
    assert!(db.follows.is_empty());
}

#[test]
fn feed_includes_every_post_once_in_creation_order() {
    let mut db = Database::default();
    let alice = register(&mut db, "alice", "pw1", "").unwrap();
    let bob = register(&mut db, "bob", "pw2", "").unwrap();

    let p1 = create_post(&mut db, alice.id, "first");
    let p2 = create_post(&mut db, bob.id, "second");
    let p3 = create_post(&mut db, alice.id, "third");

    toggle_like(&mut db, bob.id, p1.id);
    toggle_like(&mut db, alice.id, p1.id);
    add_comment(&mut db, bob.id, p2.id, "nice");

    let feed = assemble_feed(&db);
    assert_eq!(feed.len(), 3);

    // Insertion order of the post collection, not recency.
    assert_eq!(feed[0].id, p1.id);
    assert_eq!(feed[1].id, p2.id);
    assert_eq!(feed[2].id, p3.id);

    assert_eq!(feed[0].user, "alice");
    assert_eq!(feed[0].likes, 2);
    assert!(feed[0].comments.is_empty());

    assert_eq!(feed[1].user, "bob");
    assert_eq!(feed[1].likes, 0);
    assert_eq!(feed[1].comments.len(), 1);
    assert_eq!(feed[1].comments[0].content, "nice");
}

#[test]
fn feed_falls_back_to_unknown_for_missing_author() {
    let mut db = Database::default();
    // Post referencing a user id that was never created.
    create_post(&mut db, 999, "orphan");

    let feed = assemble_feed(&db);
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].user, "Unknown");
}

#[test]
fn comment_on_unknown_post_is_stored_but_never_surfaced() {
    let mut db = Database::default();
    let alice = register(&mut db, "alice", "pw1", "").unwrap();

    add_comment(&mut db, alice.id, 12345, "into the void");
    assert_eq!(db.comments.len(), 1);

    let feed = assemble_feed(&db);
    assert!(feed.iter().all(|p| p.comments.is_empty()));
}

#[test]
fn empty_profile_has_zero_counts_and_no_posts() {
    let mut db = Database::default();
    register(&mut db, "alice", "pw1", "just me").unwrap();

    let profile = assemble_profile(&db, "alice").expect("profile");
    assert_eq!(profile.username, "alice");
    assert_eq!(profile.bio, "just me");
    assert_eq!(profile.followers, 0);
    assert_eq!(profile.following, 0);
    assert!(profile.posts.is_empty());

    assert!(assemble_profile(&db, "nobody").is_none());
}

#[test]
fn alice_and_bob_scenario() {
    let mut db = Database::default();
    let alice = register(&mut db, "alice", "pw1", "").unwrap();
    let bob = register(&mut db, "bob", "pw2", "").unwrap();

    let post = create_post(&mut db, alice.id, "hello");

    // bob likes, feed shows 1 like.
    assert!(toggle_like(&mut db, bob.id, post.id));
    let feed = assemble_feed(&db);
    assert_eq!(feed[0].content, "hello");
    assert_eq!(feed[0].likes, 1);

    // bob unlikes, back to 0.
    assert!(!toggle_like(&mut db, bob.id, post.id));
    assert_eq!(assemble_feed(&db)[0].likes, 0);

    // alice follows bob, bob's profile shows one follower.
    assert!(toggle_follow(&mut db, alice.id, bob.id).unwrap());
    let profile = assemble_profile(&db, "bob").unwrap();
    assert_eq!(profile.followers, 1);
    assert_eq!(count_following(&db, alice.id), 1);

    // alice unfollows, back to 0.
    assert!(!toggle_follow(&mut db, alice.id, bob.id).unwrap());
    assert_eq!(assemble_profile(&db, "bob").unwrap().followers, 0);
    assert_eq!(count_followers(&db, bob.id), 0);
}

#[test]
fn document_round_trips_through_json() {
    let mut db = Database::default();
    let alice = register(&mut db, "alice", "pw1", "bio here").unwrap();
    let bob = register(&mut db, "bob", "pw2", "").unwrap();
    let post = create_post(&mut db, alice.id, "hello");
    add_comment(&mut db, bob.id, post.id, "hi!");
    toggle_like(&mut db, bob.id, post.id);
    toggle_follow(&mut db, alice.id, bob.id).unwrap();

    let json = serde_json::to_string(&db).unwrap();
    let restored: Database = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.users.len(), 2);
    assert_eq!(restored.posts.len(), 1);
    assert_eq!(restored.comments.len(), 1);
    assert_eq!(restored.likes, db.likes);
    assert_eq!(restored.follows, db.follows);
    assert_eq!(restored.next_id, db.next_id);

    // The counter keeps advancing from where it left off.
    let mut restored = restored;
    let next = restored.allocate_id();
    assert_eq!(next, db.next_id);
}

#[test]
fn legacy_document_without_counter_defaults_sanely() {
    // Documents written before the counter existed load with next_id = 1.
    let json = r#"{"users":[],"posts":[],"comments":[],"follows":[],"likes":[]}"#;
    let db: Database = serde_json::from_str(json).unwrap();
    assert_eq!(db.next_id, 1);
}
