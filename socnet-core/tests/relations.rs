use proptest::prelude::*;
use socnet_core::{SocialNetwork, UserId};

/// Operations the directory exposes, with ids drawn from a small range so
/// sequences collide often (duplicates, missing users, self-edges).
#[derive(Debug, Clone)]
enum Op {
    AddUser(UserId, u32),
    DeleteUser(UserId),
    AddFriendship(UserId, UserId),
    RemoveFriendship(UserId, UserId),
    CreatePost(UserId, Vec<UserId>),
    DeletePost(u32, UserId),
    SharePost(u32, UserId),
    UnsharePost(u32, UserId),
}

fn arb_user_id() -> impl Strategy<Value = UserId> {
    1u32..12
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (arb_user_id(), 1u32..90).prop_map(|(id, age)| Op::AddUser(id, age)),
        arb_user_id().prop_map(Op::DeleteUser),
        (arb_user_id(), arb_user_id()).prop_map(|(a, b)| Op::AddFriendship(a, b)),
        (arb_user_id(), arb_user_id()).prop_map(|(a, b)| Op::RemoveFriendship(a, b)),
        (arb_user_id(), prop::collection::vec(arb_user_id(), 0..4))
            .prop_map(|(creator, share)| Op::CreatePost(creator, share)),
        (1u32..40, arb_user_id()).prop_map(|(post, user)| Op::DeletePost(post, user)),
        (1u32..40, arb_user_id()).prop_map(|(post, user)| Op::SharePost(post, user)),
        (1u32..40, arb_user_id()).prop_map(|(post, user)| Op::UnsharePost(post, user)),
    ]
}

/// Apply an operation, ignoring the (expected, frequent) domain errors;
/// only the resulting graph state is under test.
fn apply(network: &mut SocialNetwork, op: &Op) {
    match op {
        Op::AddUser(id, age) => {
            let _ = network.add_user(*id, format!("user{}", id), *age);
        }
        Op::DeleteUser(id) => {
            let _ = network.delete_user(*id);
        }
        Op::AddFriendship(a, b) => {
            let _ = network.add_friendship(*a, *b);
        }
        Op::RemoveFriendship(a, b) => {
            let _ = network.remove_friendship(*a, *b);
        }
        Op::CreatePost(creator, share) => {
            let _ = network.create_post(*creator, "content", "1.1.2025", share);
        }
        Op::DeletePost(post, user) => {
            let _ = network.delete_post(*post, *user);
        }
        Op::SharePost(post, user) => {
            let _ = network.share_post(*post, *user);
        }
        Op::UnsharePost(post, user) => {
            let _ = network.unshare_post(*post, *user);
        }
    }
}

proptest! {
    /// Property: no operation sequence can break friend symmetry,
    /// share bidirectionality, or creator backlinks.
    #[test]
    fn prop_relations_stay_consistent(ops in prop::collection::vec(arb_op(), 0..120)) {
        let mut network = SocialNetwork::new();
        for op in &ops {
            apply(&mut network, op);
        }
        let issues = network.check_integrity();
        prop_assert!(issues.is_empty(), "integrity violations: {:?}", issues);
    }

    /// Property: deleting every user, in any order, leaves an empty and
    /// consistent graph at every step (cascades never dangle).
    #[test]
    fn prop_cascade_deletes_never_dangle(ops in prop::collection::vec(arb_op(), 0..80)) {
        let mut network = SocialNetwork::new();
        for op in &ops {
            apply(&mut network, op);
        }

        let user_ids: Vec<UserId> = network.users().map(|u| u.user_id).collect();
        for user_id in user_ids {
            network.delete_user(user_id).expect("listed user must exist");
            let issues = network.check_integrity();
            prop_assert!(issues.is_empty(), "integrity violations after deleting {}: {:?}", user_id, issues);
            prop_assert!(network.users().all(|u| !u.is_friend(user_id)));
            prop_assert!(network.posts().all(|p| !p.is_shared_with(user_id) && p.creator_id != user_id));
        }
        prop_assert_eq!(network.user_count(), 0);
        prop_assert_eq!(network.post_count(), 0);
    }

    /// Property: post ids increase strictly across a whole sequence and
    /// are never handed out twice, deletes included.
    #[test]
    fn prop_post_ids_are_monotonic(ops in prop::collection::vec(arb_op(), 0..120)) {
        let mut network = SocialNetwork::new();
        let mut last_id = 0;
        for op in &ops {
            if let Op::CreatePost(creator, share) = op {
                if let Ok(creation) = network.create_post(*creator, "content", "1.1.2025", share) {
                    prop_assert!(creation.post_id > last_id);
                    last_id = creation.post_id;
                }
            } else {
                apply(&mut network, op);
            }
        }
    }
}
