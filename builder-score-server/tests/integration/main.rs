mod builder_score;
mod helpers;
mod metadata;
mod og;
