use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use usergroups_directory::{Group, ServiceFactory, Services, User};

fn populated(users: usize) -> (Services, Group) {
    let services = ServiceFactory::create_services();
    let group = Group::new("bench");
    services.group_service().create(&group).unwrap();
    for i in 0..users {
        let user = User::new(format!("user-{i}"));
        services.user_service().create(&user).unwrap();
        services
            .membership_service()
            .add_user_to_group(Some(&user), Some(&group))
            .unwrap();
    }
    (services, group)
}

fn bench_add_user_to_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_user_to_group");
    group.throughput(Throughput::Elements(1));

    for size in [10usize, 1_000] {
        let (services, target) = populated(size);
        let memberships = services.membership_service();
        let existing = User::new("user-0");

        group.bench_with_input(BenchmarkId::new("idempotent", size), &size, |b, _| {
            b.iter(|| {
                memberships
                    .add_user_to_group(Some(black_box(&existing)), Some(black_box(&target)))
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("membership_queries");

    for size in [10usize, 1_000] {
        let (services, target) = populated(size);
        let memberships = services.membership_service();
        let needle = User::new(format!("user-{}", size / 2));

        group.bench_with_input(BenchmarkId::new("is_user_in_group", size), &size, |b, _| {
            b.iter(|| {
                memberships
                    .is_user_in_group(Some(black_box(&needle)), Some(black_box(&target)))
                    .unwrap()
            })
        });

        group.bench_with_input(BenchmarkId::new("get_users_in_group", size), &size, |b, _| {
            b.iter(|| memberships.get_users_in_group(Some(black_box(&target))).unwrap())
        });
    }

    group.finish();
}

fn bench_recreate_and_purge(c: &mut Criterion) {
    c.bench_function("recreate_group_then_purge_1000", |b| {
        b.iter_batched(
            || populated(1_000),
            |(services, target)| {
                services.group_service().delete(&target);
                services.group_service().create(&target).unwrap();
                black_box(services.membership_service().purge_retired())
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_add_user_to_group, bench_queries, bench_recreate_and_purge);
criterion_main!(benches);
