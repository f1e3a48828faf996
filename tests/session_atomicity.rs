//! Session Atomicity Tests
//!
//! A session's statements become visible together on commit, or not at all:
//! - A failure partway through a create leaves no question behind
//! - A replace that is abandoned after deleting choices keeps the old set
//! - Uncommitted writes are invisible to other sessions
//! - Overlapping sessions do not lock each other out

use tempfile::TempDir;

use quizdb::store::{NewChoice, Store, StoreConfig, StoreError};

// =============================================================================
// Helper Functions
// =============================================================================

async fn setup() -> (TempDir, Store) {
    let tmp = TempDir::new().unwrap();
    let url = format!("sqlite://{}", tmp.path().join("quiz.db").display());
    let store = Store::open(&StoreConfig::new(url)).await.unwrap();
    (tmp, store)
}

const CHOICES: &[NewChoice<'static>] = &[
    NewChoice {
        choice_text: "Mercury",
        is_correct: true,
    },
    NewChoice {
        choice_text: "Venus",
        is_correct: false,
    },
];

async fn seed(store: &Store) -> i64 {
    let mut session = store.session().await.unwrap();
    let id = session.insert_question("Closest planet to the sun?").await.unwrap();
    session.insert_choices(id, CHOICES).await.unwrap();
    session.commit().await.unwrap();
    id
}

// =============================================================================
// Atomicity Tests
// =============================================================================

/// Choice insertion failing after the question insert rolls back both.
#[tokio::test]
async fn test_failed_create_leaves_nothing() {
    let (_tmp, store) = setup().await;

    {
        let mut session = store.session().await.unwrap();
        let id = session.insert_question("orphan?").await.unwrap();
        session.insert_choices(id, CHOICES).await.unwrap();

        // Choice referencing a question that does not exist
        let result = session.insert_choices(id + 100, CHOICES).await;
        assert!(result.is_err());
    }

    let mut session = store.session().await.unwrap();
    assert!(session.find_question(1).await.unwrap().is_none());
    assert!(session.list_choices(1).await.unwrap().is_empty());
}

/// Abandoning a replace between delete and re-insert keeps prior choices.
#[tokio::test]
async fn test_abandoned_replace_keeps_prior_state() {
    let (_tmp, store) = setup().await;
    let id = seed(&store).await;

    {
        let mut session = store.session().await.unwrap();
        assert!(session.set_question_text(id, "rewritten").await.unwrap());
        assert_eq!(session.delete_choices(id).await.unwrap(), 2);
    }

    let mut session = store.session().await.unwrap();
    let question = session.find_question(id).await.unwrap().unwrap();
    assert_eq!(question.question_text, "Closest planet to the sun?");
    assert_eq!(session.list_choices(id).await.unwrap().len(), 2);
}

/// Abandoning a delete after removing choices keeps the whole record.
#[tokio::test]
async fn test_abandoned_delete_keeps_record() {
    let (_tmp, store) = setup().await;
    let id = seed(&store).await;

    let mut session = store.session().await.unwrap();
    session.delete_choices(id).await.unwrap();
    session.rollback().await.unwrap();

    let mut session = store.session().await.unwrap();
    assert!(session.find_question(id).await.unwrap().is_some());
    assert_eq!(session.list_choices(id).await.unwrap().len(), 2);
}

/// Deleting a question row cascades to any choices left behind.
#[tokio::test]
async fn test_question_delete_cascades() {
    let (_tmp, store) = setup().await;
    let id = seed(&store).await;

    let mut session = store.session().await.unwrap();
    assert!(session.delete_question(id).await.unwrap());
    session.commit().await.unwrap();

    let mut session = store.session().await.unwrap();
    assert!(session.list_choices(id).await.unwrap().is_empty());
}

/// Replaced choices get fresh ids.
#[tokio::test]
async fn test_replaced_choices_get_new_ids() {
    let (_tmp, store) = setup().await;
    let id = seed(&store).await;

    let mut session = store.session().await.unwrap();
    let old: Vec<i64> = session
        .list_choices(id)
        .await
        .unwrap()
        .iter()
        .map(|c| c.id)
        .collect();
    session.delete_choices(id).await.unwrap();
    session.insert_choices(id, CHOICES).await.unwrap();
    session.commit().await.unwrap();

    let mut session = store.session().await.unwrap();
    let new = session.list_choices(id).await.unwrap();
    assert_eq!(new.len(), 2);
    assert!(new.iter().all(|c| !old.contains(&c.id)));
}

// =============================================================================
// Concurrency Tests
// =============================================================================

/// A session holding a read snapshot does not block another session's
/// commit, and a delete started afterwards still goes through.
#[tokio::test]
async fn test_open_reader_does_not_block_writers() {
    let (_tmp, store) = setup().await;
    let id = seed(&store).await;

    let mut reader = store.session().await.unwrap();
    assert!(reader.find_question(id).await.unwrap().is_some());

    let mut creator = store.session().await.unwrap();
    let other = creator.insert_question("Largest planet?").await.unwrap();
    creator.commit().await.unwrap();

    let mut deleter = store.session().await.unwrap();
    assert_eq!(deleter.delete_choices(id).await.unwrap(), 2);
    assert!(deleter.delete_question(id).await.unwrap());
    deleter.commit().await.unwrap();

    // The reader keeps the snapshot it started with
    assert!(reader.find_question(id).await.unwrap().is_some());
    reader.rollback().await.unwrap();

    let mut session = store.session().await.unwrap();
    assert!(session.find_question(id).await.unwrap().is_none());
    assert!(session.find_question(other).await.unwrap().is_some());
}

/// Two write sessions running at once both commit; the second waits for
/// the first to release the write lock.
#[tokio::test]
async fn test_interleaved_writers_both_commit() {
    let (_tmp, store) = setup().await;
    let id = seed(&store).await;

    let delete = async {
        let mut session = store.session().await?;
        session.delete_choices(id).await?;
        session.delete_question(id).await?;
        session.commit().await?;
        Ok::<_, StoreError>(())
    };
    let create = async {
        let mut session = store.session().await?;
        let new_id = session.insert_question("Largest planet?").await?;
        session.insert_choices(new_id, CHOICES).await?;
        session.commit().await?;
        Ok::<_, StoreError>(new_id)
    };

    let (deleted, created) = tokio::join!(delete, create);
    deleted.unwrap();
    let new_id = created.unwrap();

    let mut session = store.session().await.unwrap();
    assert!(session.find_question(id).await.unwrap().is_none());
    assert_eq!(session.list_choices(new_id).await.unwrap().len(), 2);
}
