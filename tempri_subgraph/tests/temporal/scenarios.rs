use tempri_common::ConfigBuilder;
use tempri_subgraph::temporal_query_test;

const PATH_QUERY: &str = "3\n0\tA\n1\tA\n2\tA\n0\t1\t1:e\n1\t2\t2:e\n";

/// Node 3 and the edge into it are pruned by label while loading.
const LABELED_PATH_TARGET: &str =
    "5\n0\tA\n1\tA\n2\tA\n3\tB\n4\tA\n0\t1\t1:e,5:e\n1\t2\t3:e\n1\t3\t4:e\n2\t4\t2:e\n";

fn within_1(c: ConfigBuilder) -> ConfigBuilder {
    c.within(1)
}

fn within_2(c: ConfigBuilder) -> ConfigBuilder {
    c.within(2)
}

fn within_0(c: ConfigBuilder) -> ConfigBuilder {
    c.within(0)
}

fn undirected(c: ConfigBuilder) -> ConfigBuilder {
    c.undirected()
}

temporal_query_test!(
    name: path_in_labeled_target,
    query: PATH_QUERY,
    target: LABELED_PATH_TARGET,
    expect: 1
);

temporal_query_test!(
    name: path_in_labeled_target_within_2,
    query: PATH_QUERY,
    target: LABELED_PATH_TARGET,
    expect: 1,
    config: within_2
);

temporal_query_test!(
    name: path_in_labeled_target_within_1,
    query: PATH_QUERY,
    target: LABELED_PATH_TARGET,
    expect: 0,
    config: within_1
);

temporal_query_test!(
    name: unknown_node_label_has_empty_domain,
    query: "2\n0\tC\n1\tA\n0\t1\t1:e\n",
    target: LABELED_PATH_TARGET,
    expect: 0
);

temporal_query_test!(
    name: undirected_synchronous_star,
    query: "3\n0\tA\n1\tA\n2\tA\n0\t1\t1:e\n0\t2\t1:e\n",
    target: "4\n0\tA\n1\tA\n2\tA\n3\tA\n0\t1\t7:e\n0\t2\t7:e\n0\t3\t7:e\n1\t2\t9:e\n",
    expect: 6,
    config: undirected
);

const CALL_THEN_SMS: &str = "2\n0\tA\n1\tB\n0\t1\t1:call,2:sms\n";
const CALLS_TARGET: &str = "3\n0\tA\n1\tB\n2\tB\n0\t1\t3:call,4:sms,6:call\n0\t2\t1:sms,2:call\n";

temporal_query_test!(
    name: edge_labels_and_order_on_a_repeated_pair,
    query: CALL_THEN_SMS,
    target: CALLS_TARGET,
    expect: 1
);

temporal_query_test!(
    name: repeated_pair_within_0,
    query: CALL_THEN_SMS,
    target: CALLS_TARGET,
    expect: 0,
    config: within_0
);

temporal_query_test!(
    name: equal_query_timestamps_need_equal_target_timestamps,
    query: "3\n0\tA\n1\tA\n2\tA\n0\t1\t4:e\n1\t2\t4:e\n",
    target: "3\n0\tA\n1\tA\n2\tA\n0\t1\t1:e,2:e\n1\t2\t2:e,3:e\n",
    expect: 1
);

const CYCLE_QUERY: &str = "3\n0\tA\n1\tA\n2\tA\n0\t1\t1:e\n1\t2\t2:e\n2\t0\t3:e\n";
const CYCLE_TARGET: &str = "3\n0\tA\n1\tA\n2\tA\n0\t1\t1:e\n1\t2\t2:e\n2\t0\t0:e,3:e\n";

temporal_query_test!(
    name: cycle_rotations_follow_time,
    query: CYCLE_QUERY,
    target: CYCLE_TARGET,
    expect: 2
);

temporal_query_test!(
    name: cycle_rotations_within_2,
    query: CYCLE_QUERY,
    target: CYCLE_TARGET,
    expect: 2,
    config: within_2
);

temporal_query_test!(
    name: cycle_rotations_within_1,
    query: CYCLE_QUERY,
    target: CYCLE_TARGET,
    expect: 0,
    config: within_1
);
