//! Tests for the post service.

use std::sync::Arc;

use chrono::Utc;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockPostRepository, MockUserRepository, UserPersistenceError};
use crate::domain::{EmailAddress, ErrorCode, User, Username};

#[fixture]
fn draft() -> PostDraft {
    PostDraft::try_from_parts("Test Post", "This is a test post content.").expect("valid draft")
}

fn owner(id: i32) -> User {
    User::new(
        UserId::new(id),
        Username::new("testuser").expect("username"),
        EmailAddress::new("unique_test@example.com").expect("email"),
        Utc::now(),
    )
}

fn stored(id: i32, owner: i32, draft: &PostDraft) -> Post {
    Post::new(PostId::new(id), draft.clone(), UserId::new(owner), Utc::now())
}

fn users_with(id: i32) -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .withf(move |candidate| *candidate == UserId::new(id))
        .return_once(move |_| Ok(Some(owner(id))));
    users
}

fn users_without_anyone() -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));
    users
}

#[rstest]
#[tokio::test]
async fn create_post_records_owner(draft: PostDraft) {
    let expected = stored(1, 3, &draft);
    let returned = expected.clone();
    let mut posts = MockPostRepository::new();
    posts
        .expect_insert()
        .withf(|owner, _| *owner == UserId::new(3))
        .times(1)
        .return_once(move |_, _| Ok(returned));

    let service = PostService::new(Arc::new(posts), Arc::new(users_with(3)));
    let post = service
        .create_post(UserId::new(3), draft)
        .await
        .expect("post created");

    assert_eq!(post, expected);
    assert_eq!(post.user_id(), UserId::new(3));
}

#[rstest]
#[tokio::test]
async fn create_post_for_missing_user_skips_insert(draft: PostDraft) {
    let mut posts = MockPostRepository::new();
    posts.expect_insert().times(0);

    let service = PostService::new(Arc::new(posts), Arc::new(users_without_anyone()));
    let error = service
        .create_post(UserId::new(999), draft)
        .await
        .expect_err("owner missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "user 999 not found");
}

#[rstest]
#[tokio::test]
async fn create_post_maps_foreign_key_race_to_not_found(draft: PostDraft) {
    let mut posts = MockPostRepository::new();
    posts
        .expect_insert()
        .times(1)
        .return_once(|_, _| Err(PostPersistenceError::missing_owner(3)));

    let service = PostService::new(Arc::new(posts), Arc::new(users_with(3)));
    let error = service
        .create_post(UserId::new(3), draft)
        .await
        .expect_err("owner removed concurrently");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn create_post_surfaces_user_lookup_outage(draft: PostDraft) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Err(UserPersistenceError::connection("refused")));
    let posts = MockPostRepository::new();

    let service = PostService::new(Arc::new(posts), Arc::new(users));
    let error = service
        .create_post(UserId::new(1), draft)
        .await
        .expect_err("lookup fails");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn update_post_reports_missing_post(draft: PostDraft) {
    let mut posts = MockPostRepository::new();
    posts.expect_replace().times(1).return_once(|_, _| Ok(None));

    let service = PostService::new(Arc::new(posts), Arc::new(MockUserRepository::new()));
    let error = service
        .update_post(PostId::new(12), draft)
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "post 12 not found");
}

#[rstest]
#[case(PostPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(PostPersistenceError::query("boom"), ErrorCode::InternalError)]
#[tokio::test]
async fn delete_post_maps_persistence_errors(
    #[case] failure: PostPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut posts = MockPostRepository::new();
    posts
        .expect_delete()
        .times(1)
        .return_once(move |_| Err(failure));

    let service = PostService::new(Arc::new(posts), Arc::new(MockUserRepository::new()));
    let error = service
        .delete_post(PostId::new(1))
        .await
        .expect_err("delete fails");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn get_post_returns_record(draft: PostDraft) {
    let expected = stored(8, 1, &draft);
    let returned = expected.clone();
    let mut posts = MockPostRepository::new();
    posts
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(returned)));

    let service = PostService::new(Arc::new(posts), Arc::new(MockUserRepository::new()));
    assert_eq!(service.get_post(PostId::new(8)).await.expect("found"), expected);
}

#[rstest]
#[tokio::test]
async fn list_posts_by_owner_requires_existing_user() {
    let mut posts = MockPostRepository::new();
    posts.expect_list_by_owner().times(0);

    let service = PostService::new(Arc::new(posts), Arc::new(users_without_anyone()));
    let error = service
        .list_posts_by_owner(UserId::new(5), PageRequest::default())
        .await
        .expect_err("owner missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn list_posts_by_owner_returns_page(draft: PostDraft) {
    let data = vec![stored(1, 2, &draft), stored(4, 2, &draft)];
    let mut posts = MockPostRepository::new();
    posts
        .expect_list_by_owner()
        .withf(|owner, _| *owner == UserId::new(2))
        .times(1)
        .return_once(move |_, page| Ok(Page::new(page, 2, data)));

    let service = PostService::new(Arc::new(posts), Arc::new(users_with(2)));
    let page = service
        .list_posts_by_owner(UserId::new(2), PageRequest::default())
        .await
        .expect("page");

    assert_eq!(page.total(), 2);
    assert_eq!(page.limit(), pagination::DEFAULT_LIMIT);
    assert!(page.data().iter().all(|post| post.user_id() == UserId::new(2)));
}
