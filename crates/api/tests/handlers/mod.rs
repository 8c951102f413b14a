mod generation_test;
mod middleware_test;
