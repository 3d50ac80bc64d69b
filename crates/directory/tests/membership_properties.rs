use std::collections::HashSet;

use proptest::prelude::*;

use usergroups_directory::{Group, ServiceFactory, Services, User};

fn services_with(users: &[String], groups: &[String]) -> Services {
    let services = ServiceFactory::create_services();
    for name in users {
        services.user_service().create(&User::new(name.clone())).unwrap();
    }
    for name in groups {
        services.group_service().create(&Group::new(name.clone())).unwrap();
    }
    services
}

fn distinct_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{1,8}", 1..12).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Property: adding the same pairs twice yields the same membership as once.
    #[test]
    fn add_is_idempotent(
        users in distinct_names(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..20),
    ) {
        let group = Group::new("g");
        let services = services_with(&users, &["g".to_string()]);
        let memberships = services.membership_service();

        let chosen: Vec<User> = picks.iter().map(|i| User::new(i.get(&users).clone())).collect();
        for user in &chosen {
            memberships.add_user_to_group(Some(user), Some(&group)).unwrap();
        }
        let once = memberships.get_users_in_group(Some(&group)).unwrap();

        for user in &chosen {
            memberships.add_user_to_group(Some(user), Some(&group)).unwrap();
        }
        let twice = memberships.get_users_in_group(Some(&group)).unwrap();

        prop_assert_eq!(once, twice);
    }

    /// Property: the member set is exactly the set of added users, whatever
    /// the insertion order.
    #[test]
    fn members_are_insertion_order_independent(
        users in distinct_names(),
        seed in any::<u64>(),
    ) {
        let group = Group::new("g");
        let services = services_with(&users, &["g".to_string()]);
        let memberships = services.membership_service();

        let mut order = users.clone();
        let len = order.len();
        order.rotate_left((seed as usize) % len);
        order.reverse();

        for name in &order {
            memberships.add_user_to_group(Some(&User::new(name.clone())), Some(&group)).unwrap();
        }

        let expected: HashSet<User> = users.iter().cloned().map(User::new).collect();
        prop_assert_eq!(memberships.get_users_in_group(Some(&group)).unwrap(), expected);
    }

    /// Property: after delete + create, a group has no members, no matter what
    /// was recorded for its earlier incarnation.
    #[test]
    fn recreated_group_is_isolated(
        users in distinct_names(),
        groups in distinct_names(),
        recreate in any::<prop::sample::Index>(),
    ) {
        let services = services_with(&users, &groups);
        let memberships = services.membership_service();

        for user in &users {
            for group in &groups {
                memberships
                    .add_user_to_group(Some(&User::new(user.clone())), Some(&Group::new(group.clone())))
                    .unwrap();
            }
        }

        let target = Group::new(recreate.get(&groups).clone());
        services.group_service().delete(&target);
        services.group_service().create(&target).unwrap();

        prop_assert!(memberships.get_users_in_group(Some(&target)).unwrap().is_empty());
        for user in &users {
            let user = User::new(user.clone());
            prop_assert!(!memberships.is_user_in_group(Some(&user), Some(&target)).unwrap());
        }

        for group in groups.iter().filter(|g| *g != target.name()) {
            let members = memberships.get_users_in_group(Some(&Group::new(group.clone()))).unwrap();
            prop_assert_eq!(members.len(), users.len());
        }
    }

    /// Property: removing a pair that was never added is a silent no-op.
    #[test]
    fn remove_of_absent_pair_is_noop(user in "[a-z]{1,8}", group in "[a-z]{1,8}") {
        let services = services_with(&[user.clone()], &[group.clone()]);
        let memberships = services.membership_service();
        let user = User::new(user);
        let group = Group::new(group);

        prop_assert!(memberships.remove_user_from_group(Some(&user), Some(&group)).is_ok());
        prop_assert!(!memberships.is_user_in_group(Some(&user), Some(&group)).unwrap());
    }
}
