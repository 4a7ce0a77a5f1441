//! Domain records to wire DTOs.

use suitter_core::batch::{BatchResult, ItemFailure, ItemFailureReason};
use suitter_core::domain::{Comment, Post, PostDetail, Profile, ProfileLookup};
use suitter_core::write::{CallArg, MoveCall};
use suitter_shared::ApiResponse;
use suitter_shared::dto::{
    CallArgResponse, CommentResponse, FailureResponse, ListResponse, MoveCallResponse, PostDetailResponse,
    PostResponse, ProfileResponse, ProfileStatusResponse,
};

pub fn post(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_hex(),
        author: post.author.to_hex(),
        author_short: post.author.short(),
        content: post.content,
        like_count: post.like_count,
        image_url: post.image_url,
        comments_count: post.comments_count,
    }
}

pub fn comment(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        author: comment.author.to_hex(),
        content: comment.content,
    }
}

pub fn profile(profile: Profile) -> ProfileResponse {
    ProfileResponse {
        owner: profile.owner.to_hex(),
        username: profile.username,
        bio: profile.bio,
        image_url: profile.image_url,
    }
}

pub fn profile_status(lookup: ProfileLookup) -> ProfileStatusResponse {
    ProfileStatusResponse {
        has_profile: lookup.has_profile,
        profile: lookup.profile.map(profile),
    }
}

fn failure(failure: ItemFailure) -> FailureResponse {
    let kind = match &failure.reason {
        ItemFailureReason::Fetch(_) => "fetch",
        ItemFailureReason::Missing => "missing",
        ItemFailureReason::Decode(_) => "decode",
        ItemFailureReason::KeyMismatch { .. } => "key_mismatch",
        ItemFailureReason::PageListing(_) => "page_listing",
    };
    FailureResponse {
        key: failure.key,
        kind: kind.to_string(),
        reason: failure.reason.to_string(),
    }
}

pub fn list<T, U>(batch: BatchResult<T>, f: impl FnMut(T) -> U) -> ListResponse<U> {
    ListResponse {
        items: batch.items.into_iter().map(f).collect(),
        failures: batch.failures.into_iter().map(failure).collect(),
    }
}

pub fn post_detail(detail: PostDetail) -> PostDetailResponse {
    PostDetailResponse {
        post: post(detail.post),
        comments: list(detail.comments, comment),
    }
}

pub fn move_call(call: MoveCall) -> MoveCallResponse {
    MoveCallResponse {
        target: call.target(),
        package: call.package.to_hex(),
        settle_delay_ms: call.settle_delay().as_millis() as u64,
        function: call.entry_point.function().to_string(),
        arguments: call.arguments.into_iter().map(call_arg).collect(),
        module: call.module,
    }
}

fn call_arg(arg: CallArg) -> CallArgResponse {
    match arg {
        CallArg::Object(id) => CallArgResponse::Object(id.to_hex()),
        CallArg::String(s) => CallArgResponse::String(s),
        CallArg::Address(address) => CallArgResponse::Address(address.to_hex()),
        CallArg::U64(n) => CallArgResponse::U64(n),
        CallArg::StringVector(items) => CallArgResponse::StringVector(items),
    }
}

/// Wrap a listing, noting skipped entries in the message.
pub fn listed<T>(list: ListResponse<T>) -> ApiResponse<ListResponse<T>> {
    match list.failures.len() {
        0 => ApiResponse::ok(list),
        n => ApiResponse::ok_with_message(list, format!("{n} entries could not be read")),
    }
}
