//! Common GraphQL sources used across test suites.

/// A small user/post schema.
pub const SCHEMA: &str = r#"type Query {
  user(id: ID!): User
  posts: [Post!]!
}

type User {
  id: ID!
  name: String
  posts: [Post!]!
}

type Post {
  id: ID!
  title: String!
  author: User!
}"#;

/// Fragment file with one fragment depending on another.
pub const USER_FRAGMENTS: &str = r"fragment UserName on User {
  name
}

fragment UserFields on User {
  id
  ...UserName
}";

/// Operation file importing [`USER_FRAGMENTS`] from `./fragments.graphql`.
pub const USER_QUERY: &str = r#"#import "./fragments.graphql"

query GetUser($id: ID!) {
  user(id: $id) {
    ...UserFields
  }
}"#;
