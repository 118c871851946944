//! End-to-end dispatches against in-memory collaborators.

use tripwire_core::{ActionsUnit, HookEventType, RefName, Repository, RepositoryId, User, UserId};
use tripwire_dispatch::{
    ActionsSettings, DispatchConfig, DispatchOutcome, DispatchSummary, IgnoreReason, PullRequest,
    PullRequestFlow, TriggerContext, pull_request_context, push_context,
};
use tripwire_scheduler::ScheduleOutcome;
use tripwire_test_support::{
    DEFAULT_BRANCH, Harness, scheduled_workflow, single_job_workflow, workflow_content,
};
use tripwire_workflow::{Commit, DetectedWorkflow, DetectedWorkflows, RunStatus, TriggerEvent};

fn detected(workflows: Vec<DetectedWorkflow>) -> DetectedWorkflows {
    DetectedWorkflows {
        workflows,
        schedules: Vec::new(),
    }
}

fn push_to_main(h: &Harness, pusher: &User, after: &str) -> TriggerContext {
    push_context(
        &h.repository,
        pusher,
        RefName::from_branch(DEFAULT_BRANCH),
        "0000000",
        after,
    )
}

fn expect_dispatched(outcome: DispatchOutcome) -> DispatchSummary {
    match outcome {
        DispatchOutcome::Dispatched(summary) => summary,
        DispatchOutcome::Ignored(reason) => panic!("dispatch ignored: {reason:?}"),
    }
}

fn pull_request(h: &Harness, head_repo_id: Option<RepositoryId>, flow: PullRequestFlow) -> PullRequest {
    PullRequest {
        index: 7,
        base_repo_id: h.repository.id,
        head_repo_id,
        base_branch: DEFAULT_BRANCH.to_string(),
        head_branch: "feature".to_string(),
        flow,
    }
}

#[tokio::test]
async fn push_creates_waiting_run() {
    let h = Harness::new();
    let alice = User::individual("alice");
    h.commit_on(DEFAULT_BRANCH, "c1", "fix bug\n\nlonger explanation");
    h.detector
        .script("c1", detected(vec![single_job_workflow("ci.yml", "push")]));

    let summary = expect_dispatched(
        h.dispatcher
            .dispatch(&push_to_main(&h, &alice, "c1"))
            .await
            .expect("dispatch"),
    );

    assert_eq!(summary.git_ref, RefName::from_branch(DEFAULT_BRANCH));
    assert_eq!(summary.commit_sha, "c1");
    assert_eq!(summary.runs.len(), 1);
    assert_eq!(summary.schedules, Some(ScheduleOutcome::Cleared));

    let run = h.store.run(summary.runs[0]).expect("run stored");
    assert_eq!(run.title, "fix bug");
    assert_eq!(run.workflow_id, "ci.yml");
    assert_eq!(run.trigger_event, "push");
    assert_eq!(run.trigger_user_id, alice.id);
    assert_eq!(run.event, HookEventType::Push);
    assert!(!run.need_approval);
    assert!(!run.is_fork_pull_request);
    assert_eq!(run.status, RunStatus::Waiting);

    let jobs = h.store.jobs_of(run.id);
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].status, RunStatus::Waiting);
    assert_eq!(h.notifier.notified_runs(), vec![run.id]);

    let calls = h.detector.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].is_default_branch_push);
    assert!(calls[0].has_payload);
}

#[tokio::test]
async fn payload_is_recorded_on_run() {
    let h = Harness::new();
    h.commit_on(DEFAULT_BRANCH, "c1", "fix bug");
    h.detector
        .script("c1", detected(vec![single_job_workflow("ci.yml", "push")]));

    let summary = expect_dispatched(
        h.dispatcher
            .dispatch(&push_to_main(&h, &User::individual("alice"), "c1"))
            .await
            .expect("dispatch"),
    );

    let run = h.store.run(summary.runs[0]).expect("run stored");
    let payload: serde_json::Value = serde_json::from_str(&run.event_payload).expect("json");
    assert_eq!(payload["ref"], "refs/heads/main");
    assert_eq!(payload["after"], "c1");
    assert_eq!(payload["pusher"]["login"], "alice");
}

#[tokio::test]
async fn event_without_payload_records_null() {
    let h = Harness::new();
    h.commit_on(DEFAULT_BRANCH, "c1", "init");
    h.detector
        .script("c1", detected(vec![single_job_workflow("fork.yml", "fork")]));
    let ctx = TriggerContext::builder(h.repository.clone(), User::individual("a"), HookEventType::Fork)
        .build();

    let summary = expect_dispatched(h.dispatcher.dispatch(&ctx).await.expect("dispatch"));

    let run = h.store.run(summary.runs[0]).expect("run stored");
    assert_eq!(run.event_payload, "null");
    assert!(!h.detector.calls()[0].has_payload);
}

#[tokio::test]
async fn actions_user_is_ignored() {
    let h = Harness::new();
    h.commit_on(DEFAULT_BRANCH, "c1", "automated");
    h.detector
        .script("c1", detected(vec![single_job_workflow("ci.yml", "push")]));

    let outcome = h
        .dispatcher
        .dispatch(&push_to_main(&h, &User::actions(), "c1"))
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::ActionsUser));
    assert!(h.detector.calls().is_empty());
    assert!(h.store.runs().is_empty());
    assert!(h.store.schedules().is_empty());
}

#[tokio::test]
async fn global_disable_purges_schedules() {
    let h = Harness::with_config(DispatchConfig {
        actions: ActionsSettings {
            disabled: true,
            ..ActionsSettings::default()
        },
    });
    h.commit_on(DEFAULT_BRANCH, "c1", "fix bug");

    let outcome = h
        .dispatcher
        .dispatch(&push_to_main(&h, &User::individual("alice"), "c1"))
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::GloballyDisabled));
    assert_eq!(h.store.schedule_cleanups(), 1);
    assert!(h.detector.calls().is_empty());
}

#[tokio::test]
async fn global_disable_survives_purge_failure() {
    let h = Harness::with_config(DispatchConfig {
        actions: ActionsSettings {
            disabled: true,
            ..ActionsSettings::default()
        },
    });
    h.store.fail_clean_schedules();
    h.commit_on(DEFAULT_BRANCH, "c1", "fix bug");

    let outcome = h
        .dispatcher
        .dispatch(&push_to_main(&h, &User::individual("alice"), "c1"))
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::GloballyDisabled));
    assert_eq!(h.store.schedule_cleanups(), 0);
    assert!(h.store.runs().is_empty());
}

#[tokio::test]
async fn new_config_snapshot_takes_effect() {
    let h = Harness::new();
    h.commit_on(DEFAULT_BRANCH, "c1", "fix bug");
    let disabled = h.dispatcher.with_config(DispatchConfig {
        actions: ActionsSettings {
            disabled: true,
            ..ActionsSettings::default()
        },
    });

    let outcome = disabled
        .dispatch(&push_to_main(&h, &User::individual("alice"), "c1"))
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::GloballyDisabled));
}

#[tokio::test]
async fn repository_with_actions_off_is_ignored() {
    let repo = Repository::new(UserId::new(), "octo/widgets", DEFAULT_BRANCH)
        .with_actions(ActionsUnit::disabled());
    let h = Harness::for_repository(repo, DispatchConfig::default());
    h.commit_on(DEFAULT_BRANCH, "c1", "fix bug");

    let outcome = h
        .dispatcher
        .dispatch(&push_to_main(&h, &User::individual("alice"), "c1"))
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::RepositoryDisabled));
    assert_eq!(h.store.schedule_cleanups(), 0);
}

#[tokio::test]
async fn skip_marker_suppresses_push() {
    let h = Harness::new();
    h.commit_on(DEFAULT_BRANCH, "c1", "docs only [skip ci]");
    h.detector
        .script("c1", detected(vec![single_job_workflow("ci.yml", "push")]));

    let outcome = h
        .dispatcher
        .dispatch(&push_to_main(&h, &User::individual("alice"), "c1"))
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::SkipMarker));
    assert!(h.detector.calls().is_empty());
    assert!(h.store.runs().is_empty());
    assert!(h.store.schedules().is_empty());
}

#[tokio::test]
async fn custom_skip_markers_replace_defaults() {
    let h = Harness::with_config(DispatchConfig {
        actions: ActionsSettings {
            disabled: false,
            skip_workflow_strings: vec!["[hold]".to_string()],
        },
    });
    h.commit_on(DEFAULT_BRANCH, "c1", "docs only [skip ci]");
    h.detector
        .script("c1", detected(vec![single_job_workflow("ci.yml", "push")]));

    let summary = expect_dispatched(
        h.dispatcher
            .dispatch(&push_to_main(&h, &User::individual("alice"), "c1"))
            .await
            .expect("dispatch"),
    );
    assert_eq!(summary.runs.len(), 1);
}

#[tokio::test]
async fn push_cancels_superseded_run() {
    let h = Harness::new();
    let alice = User::individual("alice");
    h.commit_on(DEFAULT_BRANCH, "c1", "first");
    h.detector
        .script("c1", detected(vec![single_job_workflow("ci.yml", "push")]));
    let first = expect_dispatched(
        h.dispatcher
            .dispatch(&push_to_main(&h, &alice, "c1"))
            .await
            .expect("dispatch"),
    );

    h.commit_on(DEFAULT_BRANCH, "c2", "second");
    h.detector
        .script("c2", detected(vec![single_job_workflow("ci.yml", "push")]));
    let second = expect_dispatched(
        h.dispatcher
            .dispatch(&push_to_main(&h, &alice, "c2"))
            .await
            .expect("dispatch"),
    );

    let old = h.store.run(first.runs[0]).expect("first run");
    assert_eq!(old.status, RunStatus::Cancelled);
    assert!(
        h.store
            .jobs_of(old.id)
            .iter()
            .all(|j| j.status == RunStatus::Cancelled)
    );
    let new = h.store.run(second.runs[0]).expect("second run");
    assert_eq!(new.status, RunStatus::Waiting);
}

#[tokio::test]
async fn push_to_other_branch_leaves_runs_alone() {
    let h = Harness::new();
    let alice = User::individual("alice");
    h.commit_on(DEFAULT_BRANCH, "c1", "first");
    h.detector
        .script("c1", detected(vec![single_job_workflow("ci.yml", "push")]));
    let first = expect_dispatched(
        h.dispatcher
            .dispatch(&push_to_main(&h, &alice, "c1"))
            .await
            .expect("dispatch"),
    );

    h.commit_on("feature", "f1", "wip");
    h.detector
        .script("f1", detected(vec![single_job_workflow("ci.yml", "push")]));
    let feature = push_context(&h.repository, &alice, RefName::from_branch("feature"), "c1", "f1");
    let summary = expect_dispatched(h.dispatcher.dispatch(&feature).await.expect("dispatch"));

    assert_eq!(summary.schedules, Some(ScheduleOutcome::NotDefaultBranch));
    assert!(!h.detector.calls()[1].is_default_branch_push);
    let old = h.store.run(first.runs[0]).expect("first run");
    assert_eq!(old.status, RunStatus::Waiting);
}

#[tokio::test]
async fn pull_request_target_comes_from_base_branch_only() {
    let h = Harness::new();
    let alice = User::individual("alice");
    h.commits.set_ref(
        &h.repository,
        RefName::pull_head(7),
        Commit::new("h1", "add feature"),
    );
    h.commit_on(DEFAULT_BRANCH, "b1", "base");
    h.detector.script(
        "h1",
        detected(vec![
            single_job_workflow("ci.yml", "pull_request"),
            single_job_workflow("head-target.yml", "pull_request_target"),
        ]),
    );
    h.detector.script(
        "b1",
        detected(vec![
            single_job_workflow("base-ci.yml", "pull_request"),
            single_job_workflow("target.yml", "pull_request_target"),
        ]),
    );
    let ctx = pull_request_context(
        &h.repository,
        &alice,
        pull_request(&h, Some(h.repository.id), PullRequestFlow::Github),
        HookEventType::PullRequest,
        "opened",
    );

    let summary = expect_dispatched(h.dispatcher.dispatch(&ctx).await.expect("dispatch"));

    let workflows: Vec<String> = summary
        .runs
        .iter()
        .map(|id| h.store.run(*id).expect("run").workflow_id)
        .collect();
    assert_eq!(workflows, vec!["ci.yml".to_string(), "target.yml".to_string()]);

    for id in &summary.runs {
        let run = h.store.run(*id).expect("run");
        assert_eq!(run.git_ref, RefName::pull_head(7));
        assert_eq!(run.commit_sha, "h1");
        assert!(!run.need_approval);
    }

    let calls = h.detector.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].commit_sha, "b1");
    assert!(!calls[1].is_default_branch_push);
}

#[tokio::test]
async fn head_branch_cannot_override_base_target_workflow() {
    let h = Harness::new();
    h.commits
        .set_ref(&h.repository, RefName::pull_head(7), Commit::new("h1", "tamper"));
    h.commit_on(DEFAULT_BRANCH, "b1", "base");
    h.detector.script(
        "h1",
        detected(vec![DetectedWorkflow::new(
            "target.yml",
            TriggerEvent::new("pull_request_target"),
            workflow_content(&[("exfiltrate", &[])], &[]),
        )]),
    );
    h.detector.script(
        "b1",
        detected(vec![DetectedWorkflow::new(
            "target.yml",
            TriggerEvent::new("pull_request_target"),
            workflow_content(&[("label", &[])], &[]),
        )]),
    );
    let ctx = pull_request_context(
        &h.repository,
        &User::individual("mallory"),
        pull_request(&h, Some(RepositoryId::new()), PullRequestFlow::Github),
        HookEventType::PullRequestSync,
        "synchronized",
    );

    let summary = expect_dispatched(h.dispatcher.dispatch(&ctx).await.expect("dispatch"));

    assert_eq!(summary.runs.len(), 1);
    let jobs = h.store.jobs_of(summary.runs[0]);
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].job_id, "label");
}

#[tokio::test]
async fn fork_pull_request_from_newcomer_needs_approval() {
    let h = Harness::new();
    let mallory = User::individual("mallory");
    h.commits.set_ref(
        &h.repository,
        RefName::pull_head(7),
        Commit::new("h1", "add feature"),
    );
    h.commit_on(DEFAULT_BRANCH, "b1", "base");
    h.detector.script(
        "h1",
        detected(vec![DetectedWorkflow::new(
            "ci.yml",
            TriggerEvent::new("pull_request"),
            workflow_content(&[("build", &[]), ("test", &["build"])], &[]),
        )]),
    );
    h.detector.script(
        "b1",
        detected(vec![single_job_workflow("label.yml", "pull_request_target")]),
    );
    let ctx = pull_request_context(
        &h.repository,
        &mallory,
        pull_request(&h, Some(RepositoryId::new()), PullRequestFlow::Github),
        HookEventType::PullRequest,
        "opened",
    );

    let summary = expect_dispatched(h.dispatcher.dispatch(&ctx).await.expect("dispatch"));
    assert_eq!(summary.runs.len(), 2);

    let ci = h.store.run(summary.runs[0]).expect("ci run");
    assert!(ci.is_fork_pull_request);
    assert!(ci.need_approval);
    assert!(
        h.store
            .jobs_of(ci.id)
            .iter()
            .all(|j| j.status == RunStatus::Blocked)
    );

    let target = h.store.run(summary.runs[1]).expect("target run");
    assert!(target.is_fork_pull_request);
    assert!(!target.need_approval);
}

#[tokio::test]
async fn agit_pull_request_is_treated_as_fork() {
    let h = Harness::new();
    h.commits.set_ref(
        &h.repository,
        RefName::pull_head(7),
        Commit::new("h1", "topic"),
    );
    h.commit_on(DEFAULT_BRANCH, "b1", "base");
    h.detector
        .script("h1", detected(vec![single_job_workflow("ci.yml", "pull_request")]));
    let ctx = pull_request_context(
        &h.repository,
        &User::individual("mallory"),
        pull_request(&h, Some(h.repository.id), PullRequestFlow::Agit),
        HookEventType::PullRequest,
        "opened",
    );

    let summary = expect_dispatched(h.dispatcher.dispatch(&ctx).await.expect("dispatch"));
    let run = h.store.run(summary.runs[0]).expect("run");
    assert!(run.is_fork_pull_request);
    assert!(run.need_approval);
}

#[tokio::test]
async fn approval_failure_drops_only_that_workflow() {
    let h = Harness::new();
    h.permissions.fail();
    h.commits.set_ref(
        &h.repository,
        RefName::pull_head(7),
        Commit::new("h1", "add feature"),
    );
    h.commit_on(DEFAULT_BRANCH, "b1", "base");
    h.detector
        .script("h1", detected(vec![single_job_workflow("ci.yml", "pull_request")]));
    h.detector.script(
        "b1",
        detected(vec![single_job_workflow("label.yml", "pull_request_target")]),
    );
    let ctx = pull_request_context(
        &h.repository,
        &User::individual("mallory"),
        pull_request(&h, None, PullRequestFlow::Github),
        HookEventType::PullRequest,
        "opened",
    );

    let summary = expect_dispatched(h.dispatcher.dispatch(&ctx).await.expect("dispatch"));

    // pull_request_target runs skip the permission lookup entirely.
    assert_eq!(summary.runs.len(), 1);
    let run = h.store.run(summary.runs[0]).expect("run");
    assert_eq!(run.workflow_id, "label.yml");
}

#[tokio::test]
async fn missing_base_branch_fails_dispatch() {
    let h = Harness::new();
    h.commits.set_ref(
        &h.repository,
        RefName::pull_head(7),
        Commit::new("h1", "add feature"),
    );
    h.detector
        .script("h1", detected(vec![single_job_workflow("ci.yml", "pull_request")]));
    let ctx = pull_request_context(
        &h.repository,
        &User::individual("alice"),
        pull_request(&h, Some(h.repository.id), PullRequestFlow::Github),
        HookEventType::PullRequest,
        "opened",
    );

    assert!(h.dispatcher.dispatch(&ctx).await.is_err());
    assert!(h.store.runs().is_empty());
}

#[tokio::test]
async fn broken_workflows_do_not_block_siblings() {
    let h = Harness::new();
    h.store.fail_insert_for("unstorable.yml");
    h.commit_on(DEFAULT_BRANCH, "c1", "fix bug");
    h.detector.script(
        "c1",
        detected(vec![
            single_job_workflow("first.yml", "push"),
            DetectedWorkflow::new("garbage.yml", TriggerEvent::new("push"), b"not json".to_vec()),
            DetectedWorkflow::new(
                "cycle.yml",
                TriggerEvent::new("push"),
                workflow_content(&[("a", &["b"]), ("b", &["a"])], &[]),
            ),
            DetectedWorkflow::new("empty.yml", TriggerEvent::new("push"), workflow_content(&[], &[])),
            single_job_workflow("unstorable.yml", "push"),
            single_job_workflow("last.yml", "push"),
        ]),
    );

    let summary = expect_dispatched(
        h.dispatcher
            .dispatch(&push_to_main(&h, &User::individual("alice"), "c1"))
            .await
            .expect("dispatch"),
    );

    let workflows: Vec<String> = summary
        .runs
        .iter()
        .map(|id| h.store.run(*id).expect("run").workflow_id)
        .collect();
    assert_eq!(workflows, vec!["first.yml".to_string(), "last.yml".to_string()]);
    assert_eq!(h.notifier.call_count(), 2);
}

#[tokio::test]
async fn job_lookup_failure_still_reports_run() {
    let h = Harness::new();
    h.store.fail_find_jobs();
    h.commit_on(DEFAULT_BRANCH, "c1", "fix bug");
    h.detector
        .script("c1", detected(vec![single_job_workflow("ci.yml", "push")]));

    let summary = expect_dispatched(
        h.dispatcher
            .dispatch(&push_to_main(&h, &User::individual("alice"), "c1"))
            .await
            .expect("dispatch"),
    );

    assert_eq!(summary.runs.len(), 1);
    assert_eq!(h.notifier.call_count(), 0);
}

#[tokio::test]
async fn unresolvable_ref_creates_nothing() {
    let h = Harness::new();
    h.detector
        .script("c1", detected(vec![single_job_workflow("ci.yml", "push")]));

    let result = h
        .dispatcher
        .dispatch(&push_to_main(&h, &User::individual("alice"), "c1"))
        .await;

    assert!(result.is_err());
    assert!(h.store.runs().is_empty());
    assert!(h.store.schedules().is_empty());
    assert!(h.detector.calls().is_empty());
}

#[tokio::test]
async fn detection_failure_creates_nothing() {
    let h = Harness::new();
    h.commit_on(DEFAULT_BRANCH, "c1", "fix bug");
    h.detector.fail_at("c1");

    let result = h
        .dispatcher
        .dispatch(&push_to_main(&h, &User::individual("alice"), "c1"))
        .await;

    assert!(result.is_err());
    assert!(h.store.runs().is_empty());
}

#[tokio::test]
async fn disabled_workflows_are_dropped() {
    let repo = Repository::new(UserId::new(), "octo/widgets", DEFAULT_BRANCH).with_actions(
        ActionsUnit {
            enabled: true,
            disabled_workflows: vec!["slow.yml".to_string()],
        },
    );
    let h = Harness::for_repository(repo, DispatchConfig::default());
    h.commit_on(DEFAULT_BRANCH, "c1", "fix bug");
    h.detector.script(
        "c1",
        detected(vec![
            single_job_workflow("slow.yml", "push"),
            single_job_workflow("fast.yml", "push"),
        ]),
    );

    let summary = expect_dispatched(
        h.dispatcher
            .dispatch(&push_to_main(&h, &User::individual("alice"), "c1"))
            .await
            .expect("dispatch"),
    );

    assert_eq!(summary.runs.len(), 1);
    assert_eq!(
        h.store.run(summary.runs[0]).expect("run").workflow_id,
        "fast.yml"
    );
}

#[tokio::test]
async fn delete_event_resolves_default_branch() {
    let h = Harness::new();
    h.commit_on(DEFAULT_BRANCH, "m1", "merge feature");
    h.detector
        .script("m1", detected(vec![single_job_workflow("cleanup.yml", "delete")]));
    let ctx = TriggerContext::builder(h.repository.clone(), User::individual("alice"), HookEventType::Delete)
        .with_ref(RefName::from_branch("feature"))
        .build();

    let summary = expect_dispatched(h.dispatcher.dispatch(&ctx).await.expect("dispatch"));

    assert_eq!(summary.git_ref, RefName::from_branch(DEFAULT_BRANCH));
    assert_eq!(summary.commit_sha, "m1");
    assert_eq!(summary.runs.len(), 1);
}

#[tokio::test]
async fn default_branch_push_installs_schedules() {
    let h = Harness::new();
    h.commit_on(DEFAULT_BRANCH, "c1", "add nightly");
    h.detector.script(
        "c1",
        DetectedWorkflows {
            workflows: Vec::new(),
            schedules: vec![scheduled_workflow("nightly.yml", &["0 3 * * *"])],
        },
    );

    let summary = expect_dispatched(
        h.dispatcher
            .dispatch(&push_to_main(&h, &User::individual("alice"), "c1"))
            .await
            .expect("dispatch"),
    );

    assert!(summary.runs.is_empty());
    assert_eq!(summary.schedules, Some(ScheduleOutcome::Installed(1)));
    let schedules = h.store.schedules();
    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0].workflow_id, "nightly.yml");
    assert_eq!(schedules[0].title, "add nightly");
}

#[tokio::test]
async fn schedule_failure_does_not_block_runs() {
    let h = Harness::new();
    h.store.fail_count_schedules();
    h.commit_on(DEFAULT_BRANCH, "c1", "fix bug");
    h.detector.script(
        "c1",
        DetectedWorkflows {
            workflows: vec![single_job_workflow("ci.yml", "push")],
            schedules: vec![scheduled_workflow("nightly.yml", &["@daily"])],
        },
    );

    let summary = expect_dispatched(
        h.dispatcher
            .dispatch(&push_to_main(&h, &User::individual("alice"), "c1"))
            .await
            .expect("dispatch"),
    );

    assert_eq!(summary.schedules, None);
    assert_eq!(summary.runs.len(), 1);
}

#[tokio::test]
async fn notify_swallows_errors() {
    let h = Harness::new();
    h.dispatcher
        .notify(&push_to_main(&h, &User::individual("alice"), "missing"))
        .await;
    assert!(h.store.runs().is_empty());
}
