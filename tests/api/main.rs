mod health_check;
mod mongo_store;
